//! # Playback Module
//!
//! Sequential playback over a queue of songs.
//!
//! ```text
//!            replace_queue (non-empty)
//!   Empty ─────────────────────────────► Ready
//!                                          │ play / next / previous
//!                                          ▼
//!          pause / start failure        Playing ◄── next / previous / track end
//!   Paused ◄───────────────────────────────┘
//!      └──────── play ──────────────────────►
//! ```
//!
//! [`PlaybackSession`] owns one [`MediaHandle`] and drives it. Completion and
//! position sampling arrive as [`PlaybackEvent`]s tagged with the track epoch
//! they were produced for, so a late event for a song that is no longer
//! current has no effect.

mod media;
mod session;

pub use media::{ClockMedia, MediaError, MediaHandle};
pub use session::{
    DEFAULT_VOLUME, FetchTicket, PlaybackEvent, PlaybackSession, PlaybackState, SAMPLE_INTERVAL,
};
