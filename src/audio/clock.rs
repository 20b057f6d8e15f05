//! Elapsed-time estimation for the playing track.
//!
//! The mixer gives no position feedback, so elapsed time is wall-clock time
//! spent in the playing state: the finished segments are summed in
//! `accumulated`, and the running segment is measured from `started_at`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct ElapsedClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl ElapsedClock {
    /// A clock that starts running at `now`.
    pub fn started_at(now: Instant) -> Self {
        Self {
            started_at: Some(now),
            accumulated: Duration::ZERO,
        }
    }

    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    /// Close the running segment; paused time is never counted.
    pub fn pause_at(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st);
        }
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Open a new running segment at the moment of resuming.
    pub fn resume_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
