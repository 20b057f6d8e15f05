//! Application model types: `App` and `Focus`.
//!
//! The `App` struct holds the playlist store, the metadata cache and all
//! window state (selection, open playlist, popups). It is owned by the
//! runtime and handed to the playback engine's operations by reference.

use std::path::PathBuf;

use crate::audio::LoopMode;
use crate::config::UiSettings;
use crate::library::{MetadataCache, display_from_fields};
use crate::store::{DEFAULT_PLAYLIST, PlaylistStore};

use super::popup::Popup;

/// Which list receives the movement keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Playlists,
    #[default]
    Tracks,
}

/// The main application model.
pub struct App {
    pub store: PlaylistStore,
    pub metadata: MetadataCache,

    pub focus: Focus,
    /// Cursor in the playlists list.
    pub playlist_cursor: usize,
    /// Playlist whose tracks are listed.
    pub open_playlist: String,
    /// Cursor in the tracks list.
    pub selected: usize,

    /// Playlist playback follows; its `current` index is the playing entry.
    pub now_playing: Option<String>,
    pub loop_mode: LoopMode,

    pub popup: Popup,
    pub status: Option<String>,
}

impl App {
    /// Create a new `App` over `store`, opening its active playlist.
    pub fn new(store: PlaylistStore) -> Self {
        let open_playlist = store.active().to_string();
        let mut app = Self {
            store,
            metadata: MetadataCache::new(),
            focus: Focus::Tracks,
            playlist_cursor: 0,
            open_playlist,
            selected: 0,
            now_playing: None,
            loop_mode: LoopMode::default(),
            popup: Popup::None,
            status: None,
        };
        app.sync_cursor_to_open_playlist();
        app
    }

    /// Tracks of the open playlist.
    pub fn open_tracks(&self) -> &[PathBuf] {
        self.store.tracks(&self.open_playlist)
    }

    pub fn has_tracks(&self) -> bool {
        !self.open_tracks().is_empty()
    }

    /// Playlist name under the playlists cursor.
    pub fn playlist_under_cursor(&self) -> Option<&str> {
        self.store.name_at(self.playlist_cursor)
    }

    /// Playlist that next/previous/auto-advance operate on.
    pub fn playback_playlist(&self) -> String {
        self.now_playing
            .clone()
            .filter(|p| self.store.contains(p))
            .unwrap_or_else(|| self.open_playlist.clone())
    }

    /// Index of the playing entry in the open playlist, for highlighting.
    pub fn playing_index_in_open(&self) -> Option<usize> {
        if self.now_playing.as_deref() != Some(self.open_playlist.as_str()) {
            return None;
        }
        self.store.get(&self.open_playlist).and_then(|p| p.current)
    }

    /// Show `name`'s tracks, selecting its current entry.
    pub fn open(&mut self, name: &str) {
        if !self.store.contains(name) {
            return;
        }
        self.open_playlist = name.to_string();
        self.selected = self
            .store
            .get(name)
            .and_then(|p| p.current)
            .unwrap_or(0);
        self.sync_cursor_to_open_playlist();
        if let Err(e) = self.store.set_active(name) {
            self.report(e);
        }
    }

    /// Reopen the default playlist (after the open one disappeared).
    pub(super) fn open_default(&mut self) {
        self.open_playlist = DEFAULT_PLAYLIST.to_string();
        self.selected = 0;
        self.sync_cursor_to_open_playlist();
    }

    fn sync_cursor_to_open_playlist(&mut self) {
        self.playlist_cursor = self.store.position(&self.open_playlist).unwrap_or(0);
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.open_tracks().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        let n = self.store.len();
        if self.playlist_cursor >= n {
            self.playlist_cursor = n.saturating_sub(1);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Playlists => Focus::Tracks,
            Focus::Tracks => Focus::Playlists,
        };
    }

    /// Move the focused list's cursor down one row, wrapping to the top.
    pub fn cursor_down(&mut self) {
        match self.focus {
            Focus::Playlists => {
                let n = self.store.len();
                if n > 0 {
                    self.playlist_cursor = (self.playlist_cursor + 1) % n;
                }
            }
            Focus::Tracks => {
                let n = self.open_tracks().len();
                if n > 0 {
                    self.selected = (self.selected + 1) % n;
                }
            }
        }
    }

    /// Move the focused list's cursor up one row, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        match self.focus {
            Focus::Playlists => {
                let n = self.store.len();
                if n > 0 {
                    self.playlist_cursor = (self.playlist_cursor + n - 1) % n;
                }
            }
            Focus::Tracks => {
                let n = self.open_tracks().len();
                if n > 0 {
                    self.selected = (self.selected + n - 1) % n;
                }
            }
        }
    }

    pub fn cursor_top(&mut self) {
        match self.focus {
            Focus::Playlists => self.playlist_cursor = 0,
            Focus::Tracks => self.selected = 0,
        }
    }

    pub fn cursor_bottom(&mut self) {
        match self.focus {
            Focus::Playlists => self.playlist_cursor = self.store.len().saturating_sub(1),
            Focus::Tracks => self.selected = self.open_tracks().len().saturating_sub(1),
        }
    }

    pub fn cycle_loop_mode(&mut self) {
        self.loop_mode = self.loop_mode.cycle();
    }

    /// Rows of the tracks list, reading tags of tracks not seen before.
    pub fn track_rows(&mut self, ui: &UiSettings) -> Vec<String> {
        let paths = self.open_tracks().to_vec();
        paths
            .iter()
            .map(|p| {
                let track = self.metadata.get_or_load(p);
                display_from_fields(track, &ui.track_fields, &ui.track_separator)
            })
            .collect()
    }

    /// Show an error dialog and log it.
    pub fn report(&mut self, err: impl std::fmt::Display) {
        let msg = err.to_string();
        log::warn!("{msg}");
        self.popup = Popup::Error(msg);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }
}
