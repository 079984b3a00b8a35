//! # Spotify Integration Module
//!
//! HTTP client for the parts of the Spotify Web API Mood Music talks to:
//!
//! ```text
//! Auth Session / CLI
//!          ↓
//! SpotifyClient
//!     ├── auth             (authorize URL, code exchange, client credentials)
//!     ├── profile          (GET /me)
//!     ├── recommendations  (GET /recommendations, mood → seed table)
//!     └── player           (PUT /me/player/play)
//!          ↓
//! reqwest
//! ```
//!
//! Calls that feed the UI directly (`recommend`, `mood_songs`, `play_track`)
//! fail softly: errors are reported with [`warning!`](crate::warning) and
//! resolve to an empty result. Each of them has a `try_*` counterpart that
//! returns the underlying [`Error`].
//!
//! Rate limiting is handled once per request: a `429 Too Many Requests` with
//! a `Retry-After` of at most two minutes is waited out and retried.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    error::{Error, Result},
    warning,
};

pub mod auth;
pub mod player;
pub mod profile;
pub mod recommendations;

const MAX_RETRY_AFTER_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Endpoints {
    pub fn from_env() -> Self {
        Self {
            auth_url: config::spotify_auth_url(),
            token_url: config::spotify_token_url(),
            api_url: config::spotify_api_url(),
        }
    }

    /// Endpoints laid out under a single host, the way Spotify splits them
    /// across `accounts` and `api`.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            auth_url: format!("{}/authorize", base),
            token_url: format!("{}/api/token", base),
            api_url: format!("{}/v1", base),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl AppCredentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: config::spotify_client_id()?,
            client_secret: config::spotify_client_secret()?,
            redirect_uri: config::spotify_redirect_uri(),
        })
    }
}

impl std::fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    endpoints: Endpoints,
    credentials: AppCredentials,
}

impl SpotifyClient {
    pub fn new(endpoints: Endpoints, credentials: AppCredentials) -> Self {
        Self {
            http: Client::new(),
            endpoints,
            credentials,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Endpoints::from_env(), AppCredentials::from_env()?))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn credentials(&self) -> &AppCredentials {
        &self.credentials
    }

    fn api(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoints.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends a request, waiting out one rate-limit response if Spotify asks
    /// for a reasonable delay, and maps non-success statuses to errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let retry = request.try_clone();
        let response = request.send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            if let (Some(wait), Some(retry)) = (retry_after(&response), retry) {
                if wait <= MAX_RETRY_AFTER_SECS {
                    sleep(Duration::from_secs(wait)).await;
                    return check_status(retry.send().await?).await;
                }
                warning!(
                    "Spotify asked to retry after {} seconds. Giving up on this request.",
                    wait
                );
            }
        }

        check_status(response).await
    }
}

fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}
