//! Audio-related small types.
//!
//! This module defines the playback state machine and the navigation mode
//! used when a track ends or next/previous is pressed.

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop at either end of the playlist.
    NoLoop,
    /// Wrap around to the other end of the playlist.
    #[default]
    LoopAll,
    /// Repeat the current song when it ends.
    LoopOne,
}

impl LoopMode {
    /// Cycle `NoLoop -> LoopAll -> LoopOne -> NoLoop`.
    pub fn cycle(self) -> Self {
        match self {
            LoopMode::NoLoop => LoopMode::LoopAll,
            LoopMode::LoopAll => LoopMode::LoopOne,
            LoopMode::LoopOne => LoopMode::NoLoop,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoopMode::NoLoop => "No-loop",
            LoopMode::LoopAll => "Loop-around",
            LoopMode::LoopOne => "Repeat-one",
        }
    }
}
