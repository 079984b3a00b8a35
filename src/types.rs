use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodId {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Focused,
    Love,
}

impl MoodId {
    pub const ALL: [MoodId; 6] = [
        MoodId::Happy,
        MoodId::Sad,
        MoodId::Energetic,
        MoodId::Relaxed,
        MoodId::Focused,
        MoodId::Love,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodId::Happy => "happy",
            MoodId::Sad => "sad",
            MoodId::Energetic => "energetic",
            MoodId::Relaxed => "relaxed",
            MoodId::Focused => "focused",
            MoodId::Love => "love",
        }
    }
}

impl fmt::Display for MoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodId::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown mood '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tempo {
    Slow,
    Medium,
    Fast,
}

impl Tempo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tempo::Slow => "slow",
            Tempo::Medium => "medium",
            Tempo::Fast => "fast",
        }
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tempo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Ok(Tempo::Slow),
            "medium" => Ok(Tempo::Medium),
            "fast" => Ok(Tempo::Fast),
            other => Err(format!(
                "Invalid tempo '{}'. Expected one of: slow, medium, fast",
                other
            )),
        }
    }
}

/// Where a song came from: the built-in catalog or a remote recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongSource {
    Catalog,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Playable media location. Songs without one are listed but never loaded.
    pub audio_url: Option<String>,
    pub cover_url: String,
    pub duration: String,
    pub moods: Vec<String>,
    pub source: SongSource,
    pub tempo: Option<Tempo>,
    pub energy: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub key: Option<String>,
    /// Spotify track URI for remotely sourced songs.
    pub uri: Option<String>,
}

impl Song {
    pub fn has_mood(&self, mood_id: &str) -> bool {
        self.moods.iter().any(|m| m == mood_id)
    }

    /// Parses the `m:ss` duration string into seconds.
    pub fn duration_secs(&self) -> Option<f64> {
        let (minutes, seconds) = self.duration.split_once(':')?;
        let minutes: u64 = minutes.trim().parse().ok()?;
        let seconds: u64 = seconds.trim().parse().ok()?;
        Some((minutes * 60 + seconds) as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mood {
    pub id: MoodId,
    pub name: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub description: &'static str,
    pub recommended_times: &'static [&'static str],
    pub activities: &'static [&'static str],
    pub color_palette: &'static [&'static str],
}

#[derive(Tabled)]
pub struct MoodTableRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub times: String,
    pub activities: String,
}

impl From<&Mood> for MoodTableRow {
    fn from(mood: &Mood) -> Self {
        MoodTableRow {
            id: mood.id.to_string(),
            name: mood.name.to_string(),
            description: mood.description.to_string(),
            times: mood.recommended_times.join(", "),
            activities: mood.activities.join(", "),
        }
    }
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub tempo: String,
    pub energy: String,
    pub moods: String,
}

impl From<&Song> for SongTableRow {
    fn from(song: &Song) -> Self {
        SongTableRow {
            id: song.id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            duration: song.duration.clone(),
            tempo: song.tempo.map(|t| t.to_string()).unwrap_or_default(),
            energy: song.energy.map(|e| e.to_string()).unwrap_or_default(),
            moods: song.moods.join(","),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Option<Vec<RemoteTrack>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<RemoteArtist>,
    pub album: RemoteAlbum,
    pub preview_url: Option<String>,
    pub duration_ms: u64,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteAlbum {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    pub uris: Vec<String>,
}
