use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the playlist that always exists and cannot be deleted.
pub const DEFAULT_PLAYLIST: &str = "Default";

/// One named playlist. The name is the key it is stored under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub tracks: Vec<PathBuf>,
    /// Index of the track last started from this playlist.
    #[serde(default, with = "current_index")]
    pub current: Option<usize>,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[cfg(test)]
    pub fn current_track(&self) -> Option<&PathBuf> {
        self.current.and_then(|i| self.tracks.get(i))
    }
}

/// On-disk layout of the playlist document.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct Document {
    #[serde(default)]
    pub active: Option<String>,
    pub playlists: IndexMap<String, Playlist>,
}

/// Either the current layout or the flat `name -> [paths]` map written by
/// earlier versions of the player.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum AnyDocument {
    Current(Document),
    Legacy(IndexMap<String, Vec<PathBuf>>),
}

impl AnyDocument {
    pub fn into_document(self) -> Document {
        match self {
            AnyDocument::Current(doc) => doc,
            AnyDocument::Legacy(map) => Document {
                active: None,
                playlists: map
                    .into_iter()
                    .map(|(name, tracks)| {
                        (
                            name,
                            Playlist {
                                tracks,
                                current: None,
                            },
                        )
                    })
                    .collect(),
            },
        }
    }
}

/// `current` is persisted as an integer where `-1` means "no track".
mod current_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(i) => s.serialize_i64(*i as i64),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
        let raw = Option::<i64>::deserialize(d)?;
        Ok(raw.and_then(|i| usize::try_from(i).ok()))
    }
}
