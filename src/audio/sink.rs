//! The mixer seam: `AudioOutput` opens tracks, `ActiveStream` controls one.
//!
//! `RodioOutput` is the real implementation. It owns the process-wide
//! `rodio` output stream and hands out one paused `Sink` per track.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::error::PlaybackError;

/// Controls for the single stream the engine is playing.
pub trait ActiveStream {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    /// Linear gain, 0.0 to 1.0.
    fn set_volume(&self, volume: f32);
    /// True once every queued sample has been played.
    fn is_drained(&self) -> bool;
}

/// Something that can turn a file into a paused `ActiveStream`.
pub trait AudioOutput {
    type Stream: ActiveStream;

    fn open(&mut self, path: &Path) -> Result<Self::Stream, PlaybackError>;
}

pub struct RodioOutput {
    stream: OutputStream,
}

impl RodioOutput {
    /// Open the system's default output device.
    pub fn open_default() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a terminal app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl AudioOutput for RodioOutput {
    type Stream = Sink;

    fn open(&mut self, path: &Path) -> Result<Sink, PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Undecodable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(source);
        Ok(sink)
    }
}

impl ActiveStream for Sink {
    fn play(&self) {
        Sink::play(self);
    }

    fn pause(&self) {
        Sink::pause(self);
    }

    fn stop(&self) {
        Sink::stop(self);
    }

    fn set_volume(&self, volume: f32) {
        Sink::set_volume(self, volume);
    }

    fn is_drained(&self) -> bool {
        self.empty()
    }
}
