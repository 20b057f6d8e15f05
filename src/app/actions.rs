//! Operations bound to the window's controls.
//!
//! Every action that touches audio takes the engine by `&mut`; the runtime
//! owns both. Errors never escape: they are shown in the error popup.

use std::path::PathBuf;

use crate::audio::{AudioOutput, PlaybackEngine, PlaybackState};
use crate::library::expand_paths;
use crate::store::StoreError;

use super::model::{App, Focus};
use super::navigation::{auto_advance, manual_next, manual_prev};
use super::popup::{ConfirmAction, InputPurpose, Popup};

impl App {
    /// Start entry `index` of `playlist` and make it the one playback follows.
    ///
    /// The index is recorded even if the file cannot be played, so a
    /// following "next" moves past the broken entry.
    pub fn play_index<O: AudioOutput>(
        &mut self,
        engine: &mut PlaybackEngine<O>,
        playlist: &str,
        index: usize,
    ) {
        let Some(path) = self.store.tracks(playlist).get(index).cloned() else {
            return;
        };
        if let Err(e) = self.store.set_current(playlist, Some(index)) {
            self.report(e);
        }
        self.now_playing = Some(playlist.to_string());
        if playlist == self.open_playlist {
            self.selected = index;
        }

        let duration = self.metadata.get_or_load(&path).duration;
        if let Err(e) = engine.load_and_play(&path, duration) {
            // The file may have changed on disk since it was first read.
            self.metadata.invalidate(&path);
            self.report(e);
        }
    }

    /// Play the track under the tracks cursor.
    pub fn play_selected<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        if !self.has_tracks() {
            return;
        }
        let playlist = self.open_playlist.clone();
        self.play_index(engine, &playlist, self.selected);
    }

    /// Enter: open the focused playlist, or play the focused track.
    pub fn activate<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        match self.focus {
            Focus::Playlists => {
                if let Some(name) = self.playlist_under_cursor().map(str::to_string) {
                    self.open(&name);
                    self.focus = Focus::Tracks;
                }
            }
            Focus::Tracks => self.play_selected(engine),
        }
    }

    /// Pause or resume; when stopped, start the selected track.
    pub fn toggle_play_pause<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        match engine.state() {
            PlaybackState::Stopped => self.play_selected(engine),
            PlaybackState::Playing | PlaybackState::Paused => engine.toggle_pause(),
        }
    }

    pub fn stop<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        engine.stop();
    }

    pub fn next<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        let playlist = self.playback_playlist();
        let (current, len) = self.position_in(&playlist);
        if let Some(i) = manual_next(current, len, self.loop_mode) {
            self.play_index(engine, &playlist, i);
        }
    }

    pub fn prev<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        let playlist = self.playback_playlist();
        let (current, len) = self.position_in(&playlist);
        if let Some(i) = manual_prev(current, len, self.loop_mode) {
            self.play_index(engine, &playlist, i);
        }
    }

    fn position_in(&self, playlist: &str) -> (Option<usize>, usize) {
        let current = self.store.get(playlist).and_then(|p| p.current);
        (current, self.store.tracks(playlist).len())
    }

    /// Timer tick: continue with the next track once the current one ended.
    pub fn tick<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        if !engine.is_finished() {
            return;
        }
        let Some(playlist) = self.now_playing.clone() else {
            engine.stop();
            return;
        };
        if !self.store.contains(&playlist) {
            self.now_playing = None;
            engine.stop();
            return;
        }

        let (current, len) = self.position_in(&playlist);
        match auto_advance(current, len, self.loop_mode) {
            Some(i) => self.play_index(engine, &playlist, i),
            None => {
                log::info!("reached the end of \"{playlist}\"");
                engine.stop();
            }
        }
    }

    pub fn volume_up<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>, step: u8) {
        engine.set_volume(i32::from(engine.volume()) + i32::from(step));
    }

    pub fn volume_down<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>, step: u8) {
        engine.set_volume(i32::from(engine.volume()) - i32::from(step));
    }

    pub fn create_playlist(&mut self, name: &str) {
        let result = self.store.create(name);
        if !self.applied(result) {
            return;
        }
        let name = name.trim().to_string();
        self.set_status(format!("Created \"{name}\""));
        self.open(&name);
    }

    pub fn rename_playlist(&mut self, old: &str, new: &str) {
        let result = self.store.rename(old, new);
        if !self.applied(result) {
            return;
        }
        let new = new.trim().to_string();
        if self.open_playlist == old {
            self.open_playlist = new.clone();
        }
        if self.now_playing.as_deref() == Some(old) {
            self.now_playing = Some(new.clone());
        }
        self.set_status(format!("Renamed \"{old}\" to \"{new}\""));
    }

    /// Delete `name`. Playback stops if it was playing from it.
    pub fn delete_playlist<O: AudioOutput>(
        &mut self,
        engine: &mut PlaybackEngine<O>,
        name: &str,
    ) {
        let result = self.store.delete(name);
        if !self.applied(result) {
            return;
        }
        if self.now_playing.as_deref() == Some(name) {
            engine.stop();
            self.now_playing = None;
        }
        if self.open_playlist == name {
            self.open_default();
        }
        self.clamp_selection();
        self.set_status(format!("Deleted \"{name}\""));
    }

    /// Report a failed store mutation. Returns whether the mutation took
    /// effect in memory, which it does when only the save failed.
    fn applied(&mut self, result: Result<(), StoreError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                let kept = matches!(e, StoreError::Io(_));
                self.report(e);
                kept
            }
        }
    }

    /// Append files (and the audio files inside directories) to the open
    /// playlist. Unsupported files are skipped and counted.
    pub fn add_paths(&mut self, paths: &[PathBuf]) {
        if paths.is_empty() {
            return;
        }
        let expanded = expand_paths(paths);
        let added = expanded.accepted.len();
        if added > 0 {
            let playlist = self.open_playlist.clone();
            if let Err(e) = self.store.add_tracks(&playlist, expanded.accepted) {
                self.report(e);
                return;
            }
        }

        let msg = if expanded.skipped > 0 {
            format!("Added {added} tracks ({} skipped)", expanded.skipped)
        } else {
            format!("Added {added} tracks")
        };
        log::info!("{msg} to \"{}\"", self.open_playlist);
        self.set_status(msg);
    }

    /// Remove the track under the cursor from the open playlist. Playback
    /// stops when the removed entry is the one playing.
    pub fn remove_selected_track<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        if !self.has_tracks() {
            return;
        }
        let playlist = self.open_playlist.clone();
        let was_playing = self.playing_index_in_open() == Some(self.selected);
        match self.store.remove_track(&playlist, self.selected) {
            Ok(path) => {
                if was_playing {
                    engine.stop();
                    self.now_playing = None;
                }
                self.set_status(format!("Removed {}", path.display()));
                self.clamp_selection();
            }
            Err(e) => self.report(e),
        }
    }

    pub fn begin_new_playlist(&mut self) {
        self.popup = Popup::Input {
            purpose: InputPurpose::NewPlaylist,
            buffer: String::new(),
        };
    }

    /// Ask for a new name for the playlist under the cursor.
    pub fn begin_rename_playlist(&mut self) {
        let Some(name) = self.focused_playlist() else {
            return;
        };
        self.popup = Popup::Input {
            buffer: name.clone(),
            purpose: InputPurpose::RenamePlaylist(name),
        };
    }

    pub fn begin_add_path(&mut self) {
        self.popup = Popup::Input {
            purpose: InputPurpose::AddPath,
            buffer: String::new(),
        };
    }

    /// Ask before deleting the playlist under the cursor.
    pub fn begin_delete_playlist(&mut self) {
        if let Some(name) = self.focused_playlist() {
            self.popup = Popup::Confirm(ConfirmAction::DeletePlaylist(name));
        }
    }

    /// Playlist a playlist-level command applies to: the one under the
    /// playlists cursor when that list has focus, otherwise the open one.
    fn focused_playlist(&self) -> Option<String> {
        match self.focus {
            Focus::Playlists => self.playlist_under_cursor().map(str::to_string),
            Focus::Tracks => Some(self.open_playlist.clone()),
        }
    }

    pub fn toggle_metadata_popup(&mut self) {
        self.popup = match self.popup {
            Popup::Metadata => Popup::None,
            _ if self.has_tracks() => Popup::Metadata,
            _ => return,
        };
    }

    pub fn close_popup(&mut self) {
        self.popup = Popup::None;
    }

    pub fn push_input_char(&mut self, c: char) {
        if let Popup::Input { buffer, .. } = &mut self.popup {
            buffer.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let Popup::Input { buffer, .. } = &mut self.popup {
            buffer.pop();
        }
    }

    /// Apply the text typed into the input popup.
    pub fn submit_input(&mut self) {
        let Popup::Input { purpose, buffer } = std::mem::take(&mut self.popup) else {
            return;
        };
        match purpose {
            InputPurpose::NewPlaylist => self.create_playlist(&buffer),
            InputPurpose::RenamePlaylist(old) => self.rename_playlist(&old, &buffer),
            InputPurpose::AddPath => {
                let path = buffer.trim();
                if !path.is_empty() {
                    self.add_paths(&[PathBuf::from(path)]);
                }
            }
        }
    }

    /// Answer the confirmation popup.
    pub fn confirm<O: AudioOutput>(&mut self, engine: &mut PlaybackEngine<O>, yes: bool) {
        let Popup::Confirm(action) = std::mem::take(&mut self.popup) else {
            return;
        };
        if !yes {
            return;
        }
        match action {
            ConfirmAction::DeletePlaylist(name) => self.delete_playlist(engine, &name),
        }
    }
}
