//! Playlist store: named playlists of track paths, persisted to a JSON
//! document with write-through on every mutation.
//!
//! A playlist called [`DEFAULT_PLAYLIST`] always exists. Loading never fails:
//! a missing or malformed document yields a store holding only an empty
//! default playlist.

mod error;
mod model;
mod persist;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

pub use error::StoreError;
pub use model::{DEFAULT_PLAYLIST, Playlist};

use model::Document;

pub struct PlaylistStore {
    path: PathBuf,
    playlists: IndexMap<String, Playlist>,
    active: String,
}

impl PlaylistStore {
    /// A store holding only an empty default playlist, saving to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        let mut playlists = IndexMap::new();
        playlists.insert(DEFAULT_PLAYLIST.to_string(), Playlist::default());
        Self {
            path: path.into(),
            playlists,
            active: DEFAULT_PLAYLIST.to_string(),
        }
    }

    /// Restore the store from `path`, falling back to an empty store when the
    /// file is missing, unreadable or malformed.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match persist::read_document(&path) {
            Ok(Some(doc)) => {
                let store = Self::from_document(path, doc);
                log::info!(
                    "loaded {} playlists from {}",
                    store.playlists.len(),
                    store.path.display()
                );
                store
            }
            Ok(None) => {
                log::info!("no playlist file at {}, starting fresh", path.display());
                Self::empty(path)
            }
            Err(e) => {
                log::warn!("ignoring playlist file {}: {e}", path.display());
                Self::empty(path)
            }
        }
    }

    fn from_document(path: PathBuf, doc: Document) -> Self {
        let mut playlists = doc.playlists;
        if !playlists.contains_key(DEFAULT_PLAYLIST) {
            playlists.shift_insert(0, DEFAULT_PLAYLIST.to_string(), Playlist::default());
        }
        for p in playlists.values_mut() {
            if p.current.is_some_and(|i| i >= p.tracks.len()) {
                p.current = None;
            }
        }

        let active = doc
            .active
            .filter(|a| playlists.contains_key(a))
            .unwrap_or_else(|| DEFAULT_PLAYLIST.to_string());

        Self {
            path,
            playlists,
            active,
        }
    }

    /// Write the whole store to its file.
    pub fn save(&self) -> Result<(), StoreError> {
        let doc = Document {
            active: Some(self.active.clone()),
            playlists: self.playlists.clone(),
        };
        persist::write_document(&self.path, &doc)?;
        log::debug!("saved playlists to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty playlist at the end of the list.
    pub fn create(&mut self, name: &str) -> Result<(), StoreError> {
        let name = valid_name(name)?;
        if self.playlists.contains_key(name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        self.playlists.insert(name.to_string(), Playlist::default());
        self.save()
    }

    /// Delete a playlist and its tracks. The default playlist is protected.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        if name == DEFAULT_PLAYLIST {
            return Err(StoreError::ProtectedPlaylist(name.to_string()));
        }
        if self.playlists.shift_remove(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        if self.active == name {
            self.active = DEFAULT_PLAYLIST.to_string();
        }
        self.save()
    }

    /// Rename a playlist in place, keeping its position in the list.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        if old == DEFAULT_PLAYLIST {
            return Err(StoreError::ProtectedPlaylist(old.to_string()));
        }
        let new = valid_name(new)?;
        let Some(idx) = self.playlists.get_index_of(old) else {
            return Err(StoreError::NotFound(old.to_string()));
        };
        if new == old {
            return Ok(());
        }
        if self.playlists.contains_key(new) {
            return Err(StoreError::DuplicateName(new.to_string()));
        }

        let Some((_, playlist)) = self.playlists.shift_remove_index(idx) else {
            return Err(StoreError::NotFound(old.to_string()));
        };
        self.playlists.shift_insert(idx, new.to_string(), playlist);
        if self.active == old {
            self.active = new.to_string();
        }
        self.save()
    }

    /// Append `paths` to the playlist in the order given. Duplicates are kept.
    pub fn add_tracks<I, P>(&mut self, name: &str, paths: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let playlist = self.get_mut(name)?;
        playlist.tracks.extend(paths.into_iter().map(Into::into));
        self.save()
    }

    /// Remove the track at `index`.
    ///
    /// The playlist's current index keeps pointing at the same entry; if that
    /// entry is the one removed it moves to the entry before it.
    pub fn remove_track(&mut self, name: &str, index: usize) -> Result<PathBuf, StoreError> {
        let playlist = self.get_mut(name)?;
        let len = playlist.tracks.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange {
                name: name.to_string(),
                index,
                len,
            });
        }

        let removed = playlist.tracks.remove(index);
        playlist.current = match playlist.current {
            Some(cur) if cur > index => Some(cur - 1),
            Some(cur) if cur == index => cur.checked_sub(1),
            other => other,
        };
        self.save()?;
        Ok(removed)
    }

    /// Record which track of `name` is playing (or none).
    pub fn set_current(&mut self, name: &str, index: Option<usize>) -> Result<(), StoreError> {
        let playlist = self.get_mut(name)?;
        if let Some(i) = index {
            if i >= playlist.tracks.len() {
                return Err(StoreError::IndexOutOfRange {
                    name: name.to_string(),
                    index: i,
                    len: playlist.tracks.len(),
                });
            }
        }
        if playlist.current == index {
            return Ok(());
        }
        playlist.current = index;
        self.save()
    }

    /// Remember `name` as the playlist to reopen next time.
    pub fn set_active(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.playlists.contains_key(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        if self.active == name {
            return Ok(());
        }
        self.active = name.to_string();
        self.save()
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(name)
    }

    /// Tracks of `name`, or an empty slice when it does not exist.
    pub fn tracks(&self, name: &str) -> &[PathBuf] {
        self.playlists
            .get(name)
            .map(|p| p.tracks.as_slice())
            .unwrap_or(&[])
    }

    /// Playlist names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.playlists.keys().map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.playlists.get_index_of(name)
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.playlists.get_index(index).map(|(k, _)| k.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.playlists.contains_key(name)
    }

    /// Number of playlists (always at least one).
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Playlist, StoreError> {
        self.playlists
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

fn valid_name(name: &str) -> Result<&str, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        Err(StoreError::InvalidName)
    } else {
        Ok(name)
    }
}
