use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::library::AudioFormat;

use super::clock::ElapsedClock;
use super::error::PlaybackError;
use super::sink::{ActiveStream, AudioOutput};
use super::types::PlaybackState;

/// The one track currently loaded.
struct Session<S> {
    path: PathBuf,
    stream: S,
    paused: bool,
    clock: ElapsedClock,
    duration: Option<Duration>,
}

/// Plays one track at a time through an `AudioOutput`.
///
/// All calls happen on the caller's thread. End of track is not signalled;
/// the owner polls [`PlaybackEngine::is_finished`] instead.
pub struct PlaybackEngine<O: AudioOutput> {
    output: O,
    session: Option<Session<O::Stream>>,
    volume: u8,
}

impl<O: AudioOutput> PlaybackEngine<O> {
    pub fn new(output: O, volume: u8) -> Self {
        Self {
            output,
            session: None,
            volume: volume.min(100),
        }
    }

    /// Stop whatever is playing and start `path` from the beginning.
    ///
    /// `duration` is the track length if the caller already knows it; it
    /// only bounds the elapsed estimate. On error the engine is stopped.
    pub fn load_and_play(
        &mut self,
        path: &Path,
        duration: Option<Duration>,
    ) -> Result<(), PlaybackError> {
        self.stop();

        if AudioFormat::from_path(path).is_none() {
            log::warn!("refusing to play {}: unsupported format", path.display());
            return Err(PlaybackError::FileFormat {
                path: path.to_path_buf(),
            });
        }

        let meta = fs::metadata(path).map_err(|source| PlaybackError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        if !meta.is_file() {
            return Err(PlaybackError::FileAccess {
                path: path.to_path_buf(),
                source: std::io::Error::other("not a regular file"),
            });
        }

        let stream = self.output.open(path).inspect_err(|e| log::warn!("{e}"))?;
        stream.set_volume(gain(self.volume));
        stream.play();

        log::info!("playing {}", path.display());
        self.session = Some(Session {
            path: path.to_path_buf(),
            stream,
            paused: false,
            clock: ElapsedClock::start(),
            duration,
        });
        Ok(())
    }

    /// Pause the playing track. No-op when stopped or already paused.
    pub fn pause(&mut self) {
        if let Some(s) = self.session.as_mut() {
            if !s.paused {
                s.stream.pause();
                s.clock.pause();
                s.paused = true;
            }
        }
    }

    /// Resume a paused track. No-op when stopped or already playing.
    pub fn resume(&mut self) {
        if let Some(s) = self.session.as_mut() {
            if s.paused {
                s.stream.play();
                s.clock.resume();
                s.paused = false;
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state() {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.resume(),
            PlaybackState::Stopped => {}
        }
    }

    /// Halt playback and forget the session, elapsed time included.
    pub fn stop(&mut self) {
        if let Some(s) = self.session.take() {
            s.stream.stop();
            log::info!("stopped {}", s.path.display());
        }
    }

    /// Clamp `level` to 0-100, apply it and return the stored value.
    pub fn set_volume(&mut self, level: i32) -> u8 {
        self.volume = level.clamp(0, 100) as u8;
        if let Some(s) = self.session.as_ref() {
            s.stream.set_volume(gain(self.volume));
        }
        self.volume
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn state(&self) -> PlaybackState {
        match self.session.as_ref() {
            None => PlaybackState::Stopped,
            Some(s) if s.paused => PlaybackState::Paused,
            Some(_) => PlaybackState::Playing,
        }
    }

    /// Time spent playing the current track, paused time excluded. This is
    /// an estimate from the wall clock, not a read of the decoder position,
    /// and it never exceeds the known duration.
    pub fn get_elapsed_estimate(&self) -> Duration {
        let Some(s) = self.session.as_ref() else {
            return Duration::ZERO;
        };
        let elapsed = s.clock.elapsed();
        match s.duration {
            Some(d) if !d.is_zero() => elapsed.min(d),
            _ => elapsed,
        }
    }

    /// True when a playing track has run out of samples.
    pub fn is_finished(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.paused && s.stream.is_drained())
    }

    pub fn current_track(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.path.as_path())
    }

    pub fn duration(&self) -> Option<Duration> {
        self.session.as_ref().and_then(|s| s.duration)
    }

    /// Fade the current track to silence over `fade_out`, then stop.
    pub fn shutdown(&mut self, fade_out: Duration) {
        if let Some(s) = self.session.as_ref() {
            if !s.paused {
                fade_out_stream(&s.stream, gain(self.volume), fade_out);
            }
        }
        self.stop();
    }
}

fn gain(volume: u8) -> f32 {
    f32::from(volume) / 100.0
}

fn fade_out_stream<S: ActiveStream>(stream: &S, from: f32, fade_out: Duration) {
    let fade_out_ms = fade_out.as_millis() as u64;
    if fade_out_ms == 0 {
        stream.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        stream.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    stream.set_volume(0.0);
}
