#![allow(dead_code)]

use axum::Router;
use moodplay::{
    spotify::{AppCredentials, Endpoints, SpotifyClient},
    types::{Song, SongSource, Tempo},
};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_credentials() -> AppCredentials {
    AppCredentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
    }
}

pub fn client_for(base: &str) -> SpotifyClient {
    SpotifyClient::new(Endpoints::with_base(base), test_credentials())
}

pub fn song(id: &str, moods: &[&str], tempo: Option<Tempo>, energy: Option<u8>) -> Song {
    Song {
        id: id.to_string(),
        title: format!("Song {}", id),
        artist: "Test Artist".to_string(),
        audio_url: Some(format!("/audio/{}.mp3", id)),
        cover_url: "/cover.jpg".to_string(),
        duration: "3:00".to_string(),
        moods: moods.iter().map(|m| m.to_string()).collect(),
        source: SongSource::Catalog,
        tempo,
        energy,
        tags: Vec::new(),
        key: None,
        uri: None,
    }
}
