use std::path::PathBuf;

use thiserror::Error;

/// Why a track could not be played. Mixer errors are translated into these
/// before they reach the caller.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("unsupported audio format: {}", path.display())]
    FileFormat { path: PathBuf },

    #[error("cannot open {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {}: {reason}", path.display())]
    Undecodable { path: PathBuf, reason: String },

    #[error("no audio output device: {0}")]
    Device(String),
}
