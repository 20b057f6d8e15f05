//! Track index arithmetic for next/previous and end-of-track.
//!
//! `current` is the index last started in the playlist (if any) and `len`
//! its length. `None` means "nothing to play".

use crate::audio::LoopMode;

/// Index for a manual "next". Wraps only in `LoopAll`.
pub fn manual_next(current: Option<usize>, len: usize, mode: LoopMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(cur) = current else {
        return Some(0);
    };
    let cur = cur.min(len - 1);
    if cur + 1 < len {
        Some(cur + 1)
    } else if mode == LoopMode::LoopAll {
        Some(0)
    } else {
        None
    }
}

/// Index for a manual "previous". Wraps only in `LoopAll`.
pub fn manual_prev(current: Option<usize>, len: usize, mode: LoopMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let cur = current.unwrap_or(0).min(len - 1);
    if cur > 0 {
        Some(cur - 1)
    } else if mode == LoopMode::LoopAll {
        Some(len - 1)
    } else {
        None
    }
}

/// Index to continue with once the current track has ended.
pub fn auto_advance(current: Option<usize>, len: usize, mode: LoopMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(cur) = current else {
        return Some(0);
    };
    match mode {
        LoopMode::LoopOne if cur < len => Some(cur),
        LoopMode::LoopOne | LoopMode::LoopAll => Some((cur + 1) % len),
        LoopMode::NoLoop => (cur + 1 < len).then_some(cur + 1),
    }
}
