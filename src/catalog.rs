//! The built-in mood and song catalog.
//!
//! The catalog is an immutable table constructed once per process on first
//! access. Nothing in the crate mutates it; selection functions in
//! [`crate::selector`] borrow it and hand out copies of the songs they match.

use std::{collections::HashSet, sync::LazyLock};

use crate::{
    error::{Error, Result},
    types::{Mood, MoodId, Song, SongSource, Tempo},
};

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    moods: builtin_moods(),
    songs: builtin_songs(),
});

#[derive(Debug, Clone)]
pub struct Catalog {
    moods: Vec<Mood>,
    songs: Vec<Song>,
}

impl Catalog {
    /// Returns the process-wide built-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Builds a custom catalog, rejecting records that break the song invariants.
    ///
    /// # Errors
    ///
    /// Returns `Error::Catalog` when a song or mood id is duplicated, an
    /// energy score exceeds 100, or a catalog song carries no mood tags.
    pub fn new(moods: Vec<Mood>, songs: Vec<Song>) -> Result<Self> {
        let mut mood_ids = HashSet::new();
        for mood in &moods {
            if !mood_ids.insert(mood.id) {
                return Err(Error::Catalog(format!("duplicate mood id '{}'", mood.id)));
            }
        }

        let mut song_ids = HashSet::new();
        for song in &songs {
            if !song_ids.insert(song.id.as_str()) {
                return Err(Error::Catalog(format!("duplicate song id '{}'", song.id)));
            }
            if let Some(energy) = song.energy {
                if energy > 100 {
                    return Err(Error::Catalog(format!(
                        "song '{}' has energy {} outside 0..=100",
                        song.id, energy
                    )));
                }
            }
            if song.source == SongSource::Catalog && song.moods.is_empty() {
                return Err(Error::Catalog(format!("song '{}' has no mood tags", song.id)));
            }
        }

        Ok(Self { moods, songs })
    }

    pub fn moods(&self) -> &[Mood] {
        &self.moods
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn mood(&self, mood_id: &str) -> Option<&Mood> {
        self.moods.iter().find(|m| m.id.as_str() == mood_id)
    }

    pub fn song(&self, song_id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == song_id)
    }
}

fn builtin_moods() -> Vec<Mood> {
    vec![
        Mood {
            id: MoodId::Happy,
            name: "Happy",
            color: "blue",
            bg_color: "#0000FF",
            description: "Upbeat and cheerful music to brighten your day",
            recommended_times: &["Morning", "Afternoon"],
            activities: &["Exercise", "Dancing", "Social gatherings"],
            color_palette: &["#f59e0b", "#fcd34d", "#fef3c7"],
        },
        Mood {
            id: MoodId::Sad,
            name: "Sad",
            color: "blue",
            bg_color: "#3b82f6",
            description: "Melancholic tunes for when you're feeling blue",
            recommended_times: &["Evening", "Night"],
            activities: &["Reflection", "Writing", "Relaxation"],
            color_palette: &["#3b82f6", "#93c5fd", "#dbeafe"],
        },
        Mood {
            id: MoodId::Energetic,
            name: "Energetic",
            color: "red",
            bg_color: "#ef4444",
            description: "High-energy tracks to get you moving",
            recommended_times: &["Morning", "Pre-workout"],
            activities: &["Working out", "Running", "Sports"],
            color_palette: &["#ef4444", "#f87171", "#fee2e2"],
        },
        Mood {
            id: MoodId::Relaxed,
            name: "Relaxed",
            color: "green",
            bg_color: "#10b981",
            description: "Calm and soothing music to help you unwind",
            recommended_times: &["Evening", "Bedtime"],
            activities: &["Meditation", "Reading", "Yoga"],
            color_palette: &["#10b981", "#6ee7b7", "#d1fae5"],
        },
        Mood {
            id: MoodId::Focused,
            name: "Focused",
            color: "purple",
            bg_color: "#8b5cf6",
            description: "Concentration-enhancing tracks for work or study",
            recommended_times: &["Morning", "Afternoon"],
            activities: &["Studying", "Working", "Reading"],
            color_palette: &["#8b5cf6", "#a78bfa", "#ede9fe"],
        },
        Mood {
            id: MoodId::Love,
            name: "Love",
            color: "purple",
            bg_color: "#8b5cf6",
            description: "Concentration-enhancing tracks for work or study",
            recommended_times: &["Morning", "Afternoon"],
            activities: &["Studying", "Working", "Reading"],
            color_palette: &["#8b5cf6", "#a78bfa", "#ede9fe"],
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn catalog_song(
    id: &str,
    title: &str,
    artist: &str,
    audio_url: &str,
    cover_url: &str,
    duration: &str,
    moods: &[&str],
    tempo: Tempo,
    energy: u8,
    tags: &[&str],
    key: &str,
) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        audio_url: Some(audio_url.to_string()),
        cover_url: cover_url.to_string(),
        duration: duration.to_string(),
        moods: moods.iter().map(|m| m.to_string()).collect(),
        source: SongSource::Catalog,
        tempo: Some(tempo),
        energy: Some(energy),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        key: Some(key.to_string()),
        uri: None,
    }
}

fn builtin_songs() -> Vec<Song> {
    vec![
        catalog_song(
            "1",
            "Vaanam",
            "Olexy",
            "./audio/sample.mp3",
            "https://cdn.pixabay.com/photo/2016/11/19/09/57/guitar-1838390_1280.jpg",
            "2:36",
            &["love"],
            Tempo::Fast,
            10,
            &["summer", "upbeat", "acoustic"],
            "C Major",
        ),
        catalog_song(
            "2",
            "Good Day",
            "FASSounds",
            "./audio/sample.mp3",
            "https://cdn.pixabay.com/photo/2018/06/17/10/38/artist-3480274_1280.jpg",
            "2:48",
            &["happy"],
            Tempo::Fast,
            85,
            &["pop", "cheerful"],
            "G Major",
        ),
        catalog_song(
            "local_1",
            "Local Happy Song",
            "Local Artist",
            "/audio/local-happy-1.mp3",
            "/images/local-cover-1.jpg",
            "3:15",
            &["happy"],
            Tempo::Medium,
            70,
            &["local", "upbeat"],
            "D Major",
        ),
        catalog_song(
            "3",
            "Melancholy Piano",
            "Music Unlimited",
            "https://cdn.pixabay.com/download/audio/2022/08/02/audio_884fe92c21.mp3",
            "https://cdn.pixabay.com/photo/2015/05/07/11/02/guitar-756326_1280.jpg",
            "3:15",
            &["sad"],
            Tempo::Slow,
            30,
            &["piano", "emotional"],
            "A Minor",
        ),
        catalog_song(
            "4",
            "Emotional Piano",
            "Dream-Protocol",
            "https://cdn.pixabay.com/download/audio/2022/08/03/audio_2dde668d05.mp3",
            "https://cdn.pixabay.com/photo/2016/11/18/15/40/boy-1835416_1280.jpg",
            "2:56",
            &["sad", "relaxed"],
            Tempo::Medium,
            40,
            &["piano", "emotional"],
            "A Minor",
        ),
        catalog_song(
            "5",
            "Energy Rock",
            "AudioCoffee",
            "https://cdn.pixabay.com/download/audio/2022/10/25/audio_f52d7358c9.mp3",
            "https://cdn.pixabay.com/photo/2016/11/19/13/57/drum-set-1839383_1280.jpg",
            "2:59",
            &["energetic"],
            Tempo::Fast,
            90,
            &["rock", "upbeat"],
            "E Major",
        ),
        catalog_song(
            "6",
            "Upbeat Fun",
            "Coma-Media",
            "https://cdn.pixabay.com/download/audio/2021/08/08/audio_dc39bde808.mp3",
            "https://cdn.pixabay.com/photo/2015/01/20/13/13/dance-605906_1280.jpg",
            "2:25",
            &["energetic", "happy"],
            Tempo::Fast,
            80,
            &["dance", "upbeat"],
            "G Major",
        ),
        catalog_song(
            "7",
            "Ambient Calm",
            "SoulProdMusic",
            "https://cdn.pixabay.com/download/audio/2022/05/16/audio_279f3c3576.mp3",
            "https://cdn.pixabay.com/photo/2016/11/18/16/57/beach-1835939_1280.jpg",
            "3:42",
            &["relaxed"],
            Tempo::Slow,
            20,
            &["ambient", "calming"],
            "C Major",
        ),
        catalog_song(
            "8",
            "Meditation",
            "Zen-Man",
            "https://cdn.pixabay.com/download/audio/2022/05/23/audio_246b473ed8.mp3",
            "https://cdn.pixabay.com/photo/2017/03/26/21/54/yoga-2176668_1280.jpg",
            "3:18",
            &["relaxed", "focused"],
            Tempo::Slow,
            10,
            &["meditation", "calming"],
            "C Major",
        ),
        catalog_song(
            "9",
            "Study Session",
            "AudioCoffee",
            "https://cdn.pixabay.com/download/audio/2023/03/28/audio_b86b9b2c49.mp3",
            "https://cdn.pixabay.com/photo/2015/01/08/18/29/entrepreneur-593358_1280.jpg",
            "3:05",
            &["focused"],
            Tempo::Medium,
            50,
            &["study", "focused"],
            "C Major",
        ),
        catalog_song(
            "10",
            "Deep Focus",
            "Music-Unlimited",
            "https://cdn.pixabay.com/download/audio/2022/10/30/audio_347701010d.mp3",
            "https://cdn.pixabay.com/photo/2015/01/08/18/27/startup-593341_1280.jpg",
            "3:33",
            &["focused", "relaxed"],
            Tempo::Slow,
            20,
            &["deep focus", "calming"],
            "C Major",
        ),
    ]
}
