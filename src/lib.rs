//! Mood Music Library
//!
//! This library provides the building blocks of a mood-driven music browser:
//! a built-in song catalog, pure selection functions over it, an optional
//! Spotify recommendation source, a sequential playback session and an
//! OAuth-backed auth session whose state survives restarts.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `auth` - Auth session state machine and persisted credential handling
//! - `catalog` - The static, process-wide song and mood catalog
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Crate error type
//! - `playback` - Playback session state machine and media handles
//! - `selector` - Pure song selection over the catalog
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `storage` - Persisted key/value client state
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use moodplay::{catalog::Catalog, selector};
//!
//! let songs = selector::by_mood(Catalog::builtin(), "happy");
//! assert!(!songs.is_empty());
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod playback;
pub mod selector;
pub mod server;
pub mod spotify;
pub mod storage;
pub mod types;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Used for general information and status updates throughout the
/// application. Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Loading {} songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command layer may use this macro. Library code reports
/// recoverable problems through [`warning!`] instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Soft failures (remote calls, media start failures, stale completions)
/// end up here and never reach the caller as errors.
///
/// # Example
///
/// ```
/// warning!("Recommendation request failed: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
