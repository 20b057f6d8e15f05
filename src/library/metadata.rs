use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};

use super::model::Track;

/// Read display metadata for `path`. Never fails: unreadable or untagged
/// files fall back to the file name as the title.
pub fn read_track(path: &Path) -> Track {
    let default_title = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration = None;

    let exists = path.is_file();
    if exists {
        match lofty::read_from_path(path) {
            Ok(tagged) => {
                duration = Some(tagged.properties().duration());

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.title() {
                        if !v.trim().is_empty() {
                            title = v.trim().to_string();
                        }
                    }
                    if let Some(v) = tag.artist() {
                        let v = v.trim();
                        if !v.is_empty() {
                            artist = Some(v.to_string());
                        }
                    }
                    if let Some(v) = tag.album() {
                        let v = v.trim();
                        if !v.is_empty() {
                            album = Some(v.to_string());
                        }
                    }
                }
            }
            Err(e) => log::debug!("no tags for {}: {e}", path.display()),
        }
    }

    Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        duration,
        exists,
    }
}

/// Session cache of track metadata, filled the first time a path is shown.
#[derive(Default)]
pub struct MetadataCache {
    tracks: HashMap<PathBuf, Track>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for `path`, reading the file's tags on first use.
    pub fn get_or_load(&mut self, path: &Path) -> &Track {
        self.tracks
            .entry(path.to_path_buf())
            .or_insert_with(|| read_track(path))
    }

    pub fn get(&self, path: &Path) -> Option<&Track> {
        self.tracks.get(path)
    }

    /// Forget `path` so the next lookup re-reads it (e.g. after a file
    /// reappears or fails to play).
    pub fn invalidate(&mut self, path: &Path) {
        self.tracks.remove(path);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
