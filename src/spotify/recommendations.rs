//! Mood-driven recommendations from the Spotify Web API.
//!
//! A mood string is turned into a fixed set of seed genres and audio-feature
//! targets, sent to `GET /recommendations`, and the returned tracks are
//! normalized into [`Song`] records tagged with the requested mood.

use crate::{
    error::Result,
    types::{RecommendationsResponse, RemoteTrack, Song, SongSource},
    warning,
};

use super::SpotifyClient;

pub const PLACEHOLDER_COVER: &str = "/placeholder.svg?height=400&width=400";

/// Default number of tracks requested when no limit is given.
pub const MOOD_SONGS_LIMIT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodParams {
    pub seed_genres: &'static str,
    pub attributes: &'static [(&'static str, f64)],
}

const HAPPY: MoodParams = MoodParams {
    seed_genres: "pop,happy,feel-good",
    attributes: &[
        ("target_valence", 0.8),
        ("target_energy", 0.7),
        ("min_valence", 0.6),
    ],
};

const SAD: MoodParams = MoodParams {
    seed_genres: "sad,blues,indie",
    attributes: &[
        ("target_valence", 0.2),
        ("target_energy", 0.3),
        ("max_valence", 0.4),
    ],
};

const ENERGETIC: MoodParams = MoodParams {
    seed_genres: "dance,electronic,workout",
    attributes: &[
        ("target_energy", 0.9),
        ("target_tempo", 130.0),
        ("min_energy", 0.7),
    ],
};

const RELAXED: MoodParams = MoodParams {
    seed_genres: "chill,ambient,sleep",
    attributes: &[
        ("target_energy", 0.3),
        ("target_acousticness", 0.7),
        ("max_energy", 0.4),
    ],
};

const FOCUSED: MoodParams = MoodParams {
    seed_genres: "study,classical,instrumental",
    attributes: &[
        ("target_instrumentalness", 0.7),
        ("target_energy", 0.5),
        ("max_speechiness", 0.2),
    ],
};

/// Seed parameters for a mood. Anything without its own entry, `love`
/// included, gets the `happy` set.
pub fn mood_params(mood: &str) -> &'static MoodParams {
    match mood {
        "happy" => &HAPPY,
        "sad" => &SAD,
        "energetic" => &ENERGETIC,
        "relaxed" => &RELAXED,
        "focused" => &FOCUSED,
        _ => &HAPPY,
    }
}

/// Query string pairs for a recommendation request.
pub fn recommendation_query(mood: &str, limit: u32) -> Vec<(&'static str, String)> {
    let params = mood_params(mood);
    let mut query = vec![
        ("limit", limit.to_string()),
        ("seed_genres", params.seed_genres.to_string()),
    ];
    query.extend(
        params
            .attributes
            .iter()
            .map(|(name, value)| (*name, value.to_string())),
    );
    query
}

/// Formats a millisecond duration as `minutes:seconds`.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

pub fn normalize_track(track: RemoteTrack, mood: &str) -> Song {
    Song {
        id: track.id,
        title: track.name,
        artist: track
            .artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        audio_url: track.preview_url,
        cover_url: track
            .album
            .images
            .into_iter()
            .next()
            .map(|image| image.url)
            .unwrap_or_else(|| PLACEHOLDER_COVER.to_string()),
        duration: format_duration(track.duration_ms),
        moods: vec![mood.to_string()],
        source: SongSource::Remote,
        tempo: None,
        energy: None,
        tags: Vec::new(),
        key: None,
        uri: Some(track.uri),
    }
}

impl SpotifyClient {
    /// Recommended songs for `mood`, or an empty list if anything goes wrong.
    pub async fn recommend(&self, mood: &str, access_token: &str, limit: u32) -> Vec<Song> {
        match self.try_recommend(mood, access_token, limit).await {
            Ok(songs) => songs,
            Err(e) => {
                warning!("Failed to fetch recommendations for '{}': {}", mood, e);
                Vec::new()
            }
        }
    }

    pub async fn try_recommend(
        &self,
        mood: &str,
        access_token: &str,
        limit: u32,
    ) -> Result<Vec<Song>> {
        let request = self
            .http
            .get(self.api("recommendations"))
            .bearer_auth(access_token)
            .query(&recommendation_query(mood, limit));

        let response = self.send(request).await?;
        let body = response.json::<RecommendationsResponse>().await?;

        Ok(body
            .tracks
            .unwrap_or_default()
            .into_iter()
            .map(|track| normalize_track(track, mood))
            .collect())
    }

    /// Recommendations fetched with an application token, for callers that
    /// have no signed-in user.
    pub async fn mood_songs(&self, mood: &str, limit: u32) -> Vec<Song> {
        let token = match self.client_credentials_token().await {
            Ok(token) => token,
            Err(e) => {
                warning!("Error fetching mood songs: {}", e);
                return Vec::new();
            }
        };
        self.recommend(mood, &token.access_token, limit).await
    }
}
