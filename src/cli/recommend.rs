use tabled::Table;

use crate::{
    auth::AuthSession, error, info, spotify::SpotifyClient, storage::FileStore,
    types::SongTableRow, warning,
};

/// Prints remote recommendations for `mood`, using the signed-in user's
/// credential when there is one and an application token otherwise.
pub async fn recommend(mood: String, limit: u32) {
    let client = match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot reach Spotify: {}", e),
    };

    let mut session = AuthSession::new(FileStore::default_location());
    session.restore().await;

    let songs = match session.credential() {
        Some(credential) => client.recommend(&mood, credential, limit).await,
        None => {
            info!("Not signed in, using an application token.");
            client.mood_songs(&mood, limit).await
        }
    };

    if songs.is_empty() {
        warning!("No recommendations for '{}'.", mood);
        return;
    }

    let rows: Vec<SongTableRow> = songs.iter().map(SongTableRow::from).collect();
    println!("{}", Table::new(rows));
}
