//! Auth session.
//!
//! Holds the access credential and user profile obtained through Spotify's
//! authorization-code flow, and mirrors both into a [`StateStore`] so they
//! survive restarts.
//!
//! ```text
//!                 code in URL            exchange + profile ok
//! Unauthenticated ───────────► Authenticating ───────────────► Authenticated
//!        ▲                           │ any failure                    │
//!        └───────────────────────────┴──────────── logout ◄───────────┘
//! ```
//!
//! The code exchange is split into [`AuthSession::begin`] and
//! [`AuthSession::complete`] so the network round trip can run while the
//! session stays usable. Every `begin` and every `logout` moves the session
//! to a new generation; a completion carrying an older generation is dropped.

use async_trait::async_trait;
use url::Url;

use crate::{
    error::Result,
    info,
    spotify::SpotifyClient,
    storage::{ACCESS_TOKEN_KEY, StateStore, USER_KEY},
    types::{Token, UserProfile},
    warning,
};

/// The network half of the login flow.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<Token>;

    async fn user_profile(&self, access_token: &str) -> Result<UserProfile>;
}

#[async_trait]
impl AuthApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        SpotifyClient::exchange_code(self, code).await
    }

    async fn user_profile(&self, access_token: &str) -> Result<UserProfile> {
        SpotifyClient::user_profile(self, access_token).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// An in-flight code exchange, valid only for the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeTicket {
    generation: u64,
    code: String,
}

impl ExchangeTicket {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

enum StoredUser {
    Valid(UserProfile),
    Missing,
    Corrupt,
}

pub struct AuthSession<S: StateStore> {
    store: S,
    state: AuthState,
    credential: Option<String>,
    user: Option<UserProfile>,
    loading: bool,
    generation: u64,
}

impl<S: StateStore> AuthSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: AuthState::Unauthenticated,
            credential: None,
            user: None,
            loading: true,
            generation: 0,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated && self.credential.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Startup: completes a pending redirect if `location` carries a code,
    /// otherwise restores whatever was persisted by an earlier run.
    ///
    /// On success the `code` parameter is removed from `location`.
    pub async fn initialize<A: AuthApi + ?Sized>(&mut self, location: &mut Url, api: &A) {
        match self.begin(location) {
            Some(ticket) => {
                let outcome = fetch_login(api, ticket.code()).await;
                self.complete(ticket, outcome, location).await;
            }
            None => self.restore().await,
        }
    }

    /// Starts a code exchange if `location` carries an authorization code.
    pub fn begin(&mut self, location: &Url) -> Option<ExchangeTicket> {
        let code = authorization_code(location)?;
        self.generation += 1;
        self.state = AuthState::Authenticating;
        self.loading = true;
        Some(ExchangeTicket {
            generation: self.generation,
            code,
        })
    }

    /// Applies the result of an exchange started by [`begin`](Self::begin).
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    pub async fn complete(
        &mut self,
        ticket: ExchangeTicket,
        outcome: Result<(Token, UserProfile)>,
        location: &mut Url,
    ) -> bool {
        if ticket.generation != self.generation {
            warning!("Discarding a login result that no longer applies.");
            return false;
        }

        match outcome {
            Ok((token, profile)) => {
                self.persist(&token.access_token, &profile).await;
                self.credential = Some(token.access_token);
                self.user = Some(profile);
                self.state = AuthState::Authenticated;
                strip_code(location);
            }
            Err(e) => {
                warning!("Login failed: {}", e);
                self.credential = None;
                self.user = None;
                self.state = AuthState::Unauthenticated;
            }
        }
        self.loading = false;
        true
    }

    /// Loads the credential and profile persisted by an earlier run.
    ///
    /// Both must be present and readable. Anything less counts as no stored
    /// session, and a profile that no longer parses is cleared from the
    /// store along with its credential.
    pub async fn restore(&mut self) {
        let credential = match self.store.get(ACCESS_TOKEN_KEY).await {
            Ok(credential) => credential.filter(|c| !c.is_empty()),
            Err(e) => {
                warning!("Cannot read stored credential: {}", e);
                None
            }
        };

        let restored = match credential {
            Some(credential) => match self.stored_user().await {
                StoredUser::Valid(user) => Some((credential, user)),
                StoredUser::Missing => None,
                StoredUser::Corrupt => {
                    self.clear_store().await;
                    None
                }
            },
            None => None,
        };

        match restored {
            Some((credential, user)) => {
                self.credential = Some(credential);
                self.user = Some(user);
                self.state = AuthState::Authenticated;
            }
            None => {
                self.credential = None;
                self.user = None;
                self.state = AuthState::Unauthenticated;
            }
        }
        self.loading = false;
    }

    /// Forgets the credential and profile, here and in the store.
    pub async fn logout(&mut self) {
        self.generation += 1;
        self.credential = None;
        self.user = None;
        self.state = AuthState::Unauthenticated;
        self.loading = false;

        self.clear_store().await;
        info!("Signed out.");
    }

    async fn clear_store(&self) {
        for key in [ACCESS_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key).await {
                warning!("Cannot remove stored {}: {}", key, e);
            }
        }
    }

    async fn stored_user(&self) -> StoredUser {
        let raw = match self.store.get(USER_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return StoredUser::Missing,
            Err(e) => {
                warning!("Cannot read stored profile: {}", e);
                return StoredUser::Missing;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => StoredUser::Valid(user),
            Err(e) => {
                warning!("Discarding stored session with an unreadable profile: {}", e);
                StoredUser::Corrupt
            }
        }
    }

    async fn persist(&self, access_token: &str, profile: &UserProfile) {
        if let Err(e) = self.store.set(ACCESS_TOKEN_KEY, access_token).await {
            warning!("Cannot store credential: {}", e);
        }
        match serde_json::to_string(profile) {
            Ok(json) => {
                if let Err(e) = self.store.set(USER_KEY, &json).await {
                    warning!("Cannot store profile: {}", e);
                }
            }
            Err(e) => warning!("Cannot serialize profile: {}", e),
        }
    }
}

/// Exchanges the code, then fetches the profile with the new credential.
pub async fn fetch_login<A: AuthApi + ?Sized>(
    api: &A,
    code: &str,
) -> Result<(Token, UserProfile)> {
    let token = api.exchange_code(code).await?;
    let profile = api.user_profile(&token.access_token).await?;
    Ok((token, profile))
}

pub fn authorization_code(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, value)| key == "code" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Removes the `code` parameter, dropping the query entirely when nothing
/// else is left.
pub fn strip_code(location: &mut Url) {
    let remaining: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(key, _)| key != "code")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if remaining.is_empty() {
        location.set_query(None);
    } else {
        location.query_pairs_mut().clear().extend_pairs(remaining);
    }
}
