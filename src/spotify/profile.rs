use crate::{error::Result, types::UserProfile};

use super::SpotifyClient;

impl SpotifyClient {
    /// Fetches the profile of the user the credential belongs to (`GET /me`).
    pub async fn user_profile(&self, access_token: &str) -> Result<UserProfile> {
        let request = self.http.get(self.api("me")).bearer_auth(access_token);
        let response = self.send(request).await?;
        Ok(response.json::<UserProfile>().await?)
    }
}
