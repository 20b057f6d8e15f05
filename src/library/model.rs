use std::path::PathBuf;
use std::time::Duration;

/// Display metadata for one track reference, read from the file's tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    /// False when the file was gone at the time the metadata was read.
    pub exists: bool,
}

impl Track {
    /// Artist for display, with the fallback used when the tag is absent.
    pub fn artist_or_unknown(&self) -> &str {
        self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }
}

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
