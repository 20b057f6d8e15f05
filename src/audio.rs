//! Playback engine: one track at a time through the system mixer, with a
//! wall-clock estimate of elapsed time.

mod clock;
mod error;
mod player;
mod sink;
mod types;

pub use clock::ElapsedClock;
pub use error::PlaybackError;
pub use player::PlaybackEngine;
pub use sink::{ActiveStream, AudioOutput, RodioOutput};
pub use types::{LoopMode, PlaybackState};
