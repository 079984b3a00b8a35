//! # API Module
//!
//! HTTP handlers for the local server that receives Spotify's authorization
//! redirect during `moodplay login`.
//!
//! ## Endpoints
//!
//! - [`home`] - Landing page the browser ends up on after signing in
//! - [`callback`] - Authorization redirect target; validates the `state`
//!   nonce, passes the query to the waiting login flow and redirects to `/`
//! - [`health`] - Status and version for quick checks
//!
//! The code carried by the redirect is not exchanged here. The login flow
//! feeds the full redirect URL to the auth session, which performs the
//! exchange and strips the code.

mod callback;
mod health;
mod home;

pub use callback::{PendingLogin, SharedLogin, callback};
pub use health::health;
pub use home::home;
