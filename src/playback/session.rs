use std::time::Duration;

use tokio::{runtime::Handle, sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::{types::Song, warning};

use super::media::MediaHandle;

/// How often the position sampler mirrors the media handle while playing.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

pub const DEFAULT_VOLUME: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No queue loaded.
    Empty,
    /// Queue loaded, nothing started yet.
    Ready,
    Playing,
    Paused,
}

/// Something that happened to the media, tagged with the track epoch it
/// belongs to. Events from an earlier epoch are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Tick { epoch: u64 },
    Ended { epoch: u64 },
}

/// Handle for a song list that is still being fetched. Only the most recent
/// ticket may populate the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Sequential player over a queue of songs.
///
/// `generation` changes whenever the queue is replaced or a new fetch is
/// started; `epoch` changes whenever the current track changes. The
/// position sampler only runs while `Playing` and is aborted on every exit
/// from that state, including drop.
pub struct PlaybackSession<M: MediaHandle> {
    media: M,
    queue: Vec<Song>,
    index: usize,
    state: PlaybackState,
    position: f64,
    duration: f64,
    volume: f32,
    muted: bool,
    media_loaded: bool,
    generation: u64,
    epoch: u64,
    events: Option<UnboundedSender<PlaybackEvent>>,
    sampler: Option<JoinHandle<()>>,
}

impl<M: MediaHandle> PlaybackSession<M> {
    pub fn new(mut media: M) -> Self {
        media.set_volume(DEFAULT_VOLUME);
        Self {
            media,
            queue: Vec::new(),
            index: 0,
            state: PlaybackState::Empty,
            position: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
            muted: false,
            media_loaded: false,
            generation: 0,
            epoch: 0,
            events: None,
            sampler: None,
        }
    }

    /// Enables the position sampler, which reports through `events`.
    pub fn with_events(mut self, events: UnboundedSender<PlaybackEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn queue(&self) -> &[Song] {
        &self.queue
    }

    /// Index of the current song, `None` while the queue is empty.
    pub fn index(&self) -> Option<usize> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.index)
        }
    }

    pub fn current(&self) -> Option<&Song> {
        self.queue.get(self.index)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume the media handle actually receives.
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_some()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Marks the start of an asynchronous fetch for a new queue. Any ticket
    /// handed out earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Installs the result of a fetch unless a newer selection superseded it.
    /// Returns whether the songs were applied.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, songs: Vec<Song>) -> bool {
        if ticket.generation != self.generation {
            warning!("Discarding songs from a selection that is no longer current.");
            return false;
        }
        self.replace_queue(songs);
        true
    }

    /// Loads a new queue and resets to the first song, paused at 0 s.
    pub fn replace_queue(&mut self, songs: Vec<Song>) {
        self.stop_sampler();
        self.media.pause();
        self.generation += 1;
        self.queue = songs;
        self.index = 0;
        self.state = if self.queue.is_empty() {
            PlaybackState::Empty
        } else {
            PlaybackState::Ready
        };
        self.change_track();
    }

    pub fn play(&mut self) -> PlaybackState {
        match self.state {
            PlaybackState::Ready | PlaybackState::Paused => self.start(),
            PlaybackState::Empty | PlaybackState::Playing => {}
        }
        self.state
    }

    pub fn pause(&mut self) -> PlaybackState {
        if self.state == PlaybackState::Playing {
            self.media.pause();
            self.position = self.media.position();
            self.stop_sampler();
            self.state = PlaybackState::Paused;
        }
        self.state
    }

    pub fn toggle(&mut self) -> PlaybackState {
        if self.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Skips forward, wrapping to the first song, and starts playing.
    pub fn next(&mut self) -> PlaybackState {
        if self.queue.is_empty() {
            return self.state;
        }
        self.index = (self.index + 1) % self.queue.len();
        self.skip_to_current()
    }

    /// Skips back, wrapping to the last song, and starts playing.
    pub fn previous(&mut self) -> PlaybackState {
        if self.queue.is_empty() {
            return self.state;
        }
        let len = self.queue.len();
        self.index = (self.index + len - 1) % len;
        self.skip_to_current()
    }

    /// Moves within the current song, clamped to `0..=duration`. The
    /// play/pause state is left alone.
    pub fn seek(&mut self, position: f64) -> f64 {
        if self.state == PlaybackState::Empty {
            return self.position;
        }
        let position = if position.is_nan() { 0.0 } else { position };
        let clamped = position.clamp(0.0, self.duration.max(0.0));
        self.media.seek(clamped);
        self.position = clamped;
        clamped
    }

    /// Sets the volume, clamped to `0..=1`. Zero mutes; anything else unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.volume = volume;
        self.muted = volume == 0.0;
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.apply_volume();
        self.muted
    }

    /// Feeds a media or sampler event into the state machine. Returns `false`
    /// when the event was stale and ignored.
    pub fn handle_event(&mut self, event: PlaybackEvent) -> bool {
        match event {
            PlaybackEvent::Tick { epoch } => {
                if epoch != self.epoch || self.state != PlaybackState::Playing {
                    return false;
                }
                self.position = self.media.position();
                if let Some(duration) = self.media.duration() {
                    self.duration = duration;
                }
                if self.media.ended() {
                    self.next();
                }
                true
            }
            PlaybackEvent::Ended { epoch } => {
                if epoch != self.epoch {
                    return false;
                }
                self.next();
                true
            }
        }
    }

    fn skip_to_current(&mut self) -> PlaybackState {
        self.change_track();
        self.start();
        self.state
    }

    fn change_track(&mut self) {
        self.stop_sampler();
        self.epoch += 1;
        self.position = 0.0;

        match self.queue.get(self.index) {
            Some(song) if song.audio_url.is_some() => {
                self.media.load(song);
                self.media_loaded = true;
                self.duration = self
                    .media
                    .duration()
                    .or_else(|| song.duration_secs())
                    .unwrap_or(0.0);
            }
            Some(song) => {
                self.media.unload();
                self.media_loaded = false;
                self.duration = song.duration_secs().unwrap_or(0.0);
            }
            None => {
                self.media.unload();
                self.media_loaded = false;
                self.duration = 0.0;
            }
        }
        self.apply_volume();
    }

    fn start(&mut self) {
        if !self.media_loaded {
            let title = self.current().map(|s| s.title.clone()).unwrap_or_default();
            warning!("No playable source for '{}'.", title);
            self.stop_sampler();
            self.state = PlaybackState::Paused;
            return;
        }

        match self.media.play() {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                self.start_sampler();
            }
            Err(e) => {
                warning!("Error playing audio: {}", e);
                self.stop_sampler();
                self.state = PlaybackState::Paused;
            }
        }
    }

    fn apply_volume(&mut self) {
        let volume = self.effective_volume();
        self.media.set_volume(volume);
    }

    fn start_sampler(&mut self) {
        self.stop_sampler();
        let Some(events) = self.events.clone() else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            return;
        };
        let epoch = self.epoch;
        self.sampler = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval(SAMPLE_INTERVAL);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if events.send(PlaybackEvent::Tick { epoch }).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop_sampler(&mut self) {
        if let Some(sampler) = self.sampler.take() {
            sampler.abort();
        }
    }
}

impl<M: MediaHandle> Drop for PlaybackSession<M> {
    fn drop(&mut self) {
        self.stop_sampler();
    }
}
