use crate::{error::Result, types::PlayRequest, warning};

use super::SpotifyClient;

impl SpotifyClient {
    /// Starts `uri` on the user's active Spotify device.
    ///
    /// Best effort: a missing device, an expired credential or a network
    /// failure is reported as a warning and otherwise ignored.
    pub async fn play_track(&self, uri: &str, access_token: &str) {
        if let Err(e) = self.try_play_track(uri, access_token).await {
            warning!("Error playing track {}: {}", uri, e);
        }
    }

    pub async fn try_play_track(&self, uri: &str, access_token: &str) -> Result<()> {
        let request = self
            .http
            .put(self.api("me/player/play"))
            .bearer_auth(access_token)
            .json(&PlayRequest {
                uris: vec![uri.to_string()],
            });
        self.send(request).await?;
        Ok(())
    }
}
