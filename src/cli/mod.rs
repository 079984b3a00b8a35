//! # CLI Module
//!
//! User-facing commands of the `moodplay` binary. Each command wires the
//! library pieces together and reports through the crate's status macros.
//!
//! ## Commands
//!
//! - [`list_moods`] / [`palette`] - Browse the built-in moods
//! - [`list_songs`] - Catalog songs for a mood, energy level, tempo or time of day
//! - [`recommend`] - Remote recommendations from Spotify for a mood
//! - [`play`] - Interactive player over a selection
//! - [`login`] / [`logout`] / [`status`] - Spotify session management
//!
//! ```text
//! CLI Layer (commands, tables, player loop)
//!     ↓
//! Selector / Playback Session / Auth Session
//!     ↓
//! Catalog / Spotify client / State store
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! moodplay moods                       # List moods
//! moodplay songs --mood happy          # Catalog songs for a mood
//! moodplay songs --energy 50           # Songs with energy 30..=70
//! moodplay play --tempo fast           # Play the fast songs
//! moodplay login                       # Sign in with Spotify
//! moodplay play --mood sad --remote    # Play Spotify recommendations
//! ```

mod auth;
mod browse;
mod player;
mod recommend;

pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use browse::list_moods;
pub use browse::list_songs;
pub use browse::palette;
pub use player::PlayerCommand;
pub use player::play;
pub use recommend::recommend;
