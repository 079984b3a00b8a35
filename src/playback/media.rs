use thiserror::Error;
use tokio::time::Instant;

use crate::types::Song;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    #[error("no playable source loaded")]
    NoSource,

    #[error("media unavailable: {0}")]
    Unavailable(String),
}

/// A single time-indexed media element the playback session drives.
///
/// Positions and durations are in seconds.
pub trait MediaHandle: Send {
    /// Replaces the current source with `song` and rewinds to the start.
    fn load(&mut self, song: &Song);

    /// Drops the current source. Used for songs without a media location.
    fn unload(&mut self);

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn seek(&mut self, position: f64);

    /// Audible volume, already adjusted for mute.
    fn set_volume(&mut self, volume: f32);

    fn position(&self) -> f64;

    /// `None` until the source's length is known.
    fn duration(&self) -> Option<f64>;

    fn ended(&self) -> bool;
}

/// Media handle that runs a wall-clock timeline over the song's advertised
/// duration instead of decoding audio.
#[derive(Debug, Default)]
pub struct ClockMedia {
    duration: Option<f64>,
    loaded: bool,
    offset: f64,
    started_at: Option<Instant>,
    volume: f32,
}

impl ClockMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    fn elapsed(&self) -> f64 {
        self.started_at
            .map(|started| started.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl MediaHandle for ClockMedia {
    fn load(&mut self, song: &Song) {
        self.loaded = song.audio_url.is_some();
        self.duration = song.duration_secs();
        self.offset = 0.0;
        self.started_at = None;
    }

    fn unload(&mut self) {
        self.loaded = false;
        self.duration = None;
        self.offset = 0.0;
        self.started_at = None;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if !self.loaded {
            return Err(MediaError::NoSource);
        }
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.offset = self.position();
        self.started_at = None;
    }

    fn seek(&mut self, position: f64) {
        self.offset = position;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn position(&self) -> f64 {
        let position = self.offset + self.elapsed();
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn ended(&self) -> bool {
        match self.duration {
            Some(duration) => self.loaded && self.position() >= duration,
            None => false,
        }
    }
}
