use thiserror::Error;

/// Errors from playlist management and persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a playlist named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("the \"{0}\" playlist cannot be deleted or renamed")]
    ProtectedPlaylist(String),

    #[error("playlist \"{0}\" not found")]
    NotFound(String),

    #[error("track {index} is out of range for \"{name}\" ({len} tracks)")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("playlist names must not be empty")]
    InvalidName,

    #[error("playlist file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("playlist file is malformed: {0}")]
    StoreCorrupt(#[from] serde_json::Error),
}
