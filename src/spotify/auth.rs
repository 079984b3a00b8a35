use rand::{Rng, distr::Alphanumeric};
use url::Url;

use crate::{config, error::Result, types::Token};

use super::SpotifyClient;

/// Random `state` value tying an authorization redirect to the flow that
/// started it.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

impl SpotifyClient {
    /// Builds the URL the user is sent to for authorization.
    ///
    /// Carries the client id, `response_type=code`, the registered redirect
    /// URI, the fixed scope string and the caller's `state` nonce.
    ///
    /// # Errors
    ///
    /// Fails only if the configured authorization endpoint is not a valid URL.
    pub fn authorize_url(&self, state: &str) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.endpoints.auth_url,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("scope", config::SPOTIFY_SCOPE),
                ("state", state),
            ],
        )?)
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Uses the `authorization_code` grant with the client secret sent in the
    /// form body. The code is single-use; a second exchange of the same code
    /// is rejected by Spotify.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let request = self.http.post(&self.endpoints.token_url).form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ]);

        let response = self.send(request).await?;
        Ok(response.json::<Token>().await?)
    }

    /// Obtains an application token through the `client_credentials` grant.
    ///
    /// Authenticates with HTTP Basic auth of `client_id:client_secret`. The
    /// token is not tied to a user and cannot drive playback.
    pub async fn client_credentials_token(&self) -> Result<Token> {
        let request = self
            .http
            .post(&self.endpoints.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")]);

        let response = self.send(request).await?;
        Ok(response.json::<Token>().await?)
    }
}
