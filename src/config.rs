//! Configuration management for Mood Music.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file in the local data directory. Endpoints and the callback
//! address fall back to Spotify's public defaults; the application
//! credentials have no default and must be configured before any remote call.
//!
//! The `.env` file is looked up in:
//! - Linux: `~/.local/share/moodplay/.env`
//! - macOS: `~/Library/Application Support/moodplay/.env`
//! - Windows: `%LOCALAPPDATA%/moodplay/.env`

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const APP_DIR: &str = "moodplay";

/// Scope requested during authorization. Fixed for the lifetime of the app.
pub const SPOTIFY_SCOPE: &str =
    "streaming user-read-email user-read-private user-read-playback-state user-modify-playback-state";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from `<data_local_dir>/moodplay/.env`.
///
/// Creates the directory if needed. A missing `.env` file is not an error,
/// since every value can also come from the process environment.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file exists but cannot
/// be parsed.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.exists() {
        dotenv::from_path(&path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// Platform local data directory for this application.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify application client id (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Spotify application client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// Never log this value.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Redirect URI registered with the Spotify application (`SPOTIFY_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> String {
    env_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_auth_url() -> String {
    env_or("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_token_url() -> String {
    env_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)
}

pub fn spotify_api_url() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{} must be set", name)))
}
