use std::fs;
use std::path::{Path, PathBuf};

use super::navigation::{auto_advance, manual_next, manual_prev};
use super::*;
use crate::audio::tests::fake_engine;
use crate::audio::{LoopMode, PlaybackState};
use crate::config::UiSettings;
use crate::store::{DEFAULT_PLAYLIST, PlaylistStore};

fn audio_files(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|n| {
            let p = dir.join(n);
            fs::write(&p, b"fake audio").unwrap();
            p
        })
        .collect()
}

/// An app whose default playlist holds `a.mp3, b.wav, c.ogg`.
fn app_with_tracks(dir: &Path) -> (App, Vec<PathBuf>) {
    let tracks = audio_files(dir, &["a.mp3", "b.wav", "c.ogg"]);
    let mut store = PlaylistStore::load(dir.join("playlists.json"));
    store.add_tracks(DEFAULT_PLAYLIST, tracks.clone()).unwrap();
    (App::new(store), tracks)
}

fn current_of(app: &App, playlist: &str) -> Option<usize> {
    app.store.get(playlist).and_then(|p| p.current)
}

#[test]
fn manual_navigation_wraps_only_in_loop_all() {
    assert_eq!(manual_next(Some(2), 3, LoopMode::LoopAll), Some(0));
    assert_eq!(manual_next(Some(2), 3, LoopMode::NoLoop), None);
    assert_eq!(manual_next(Some(2), 3, LoopMode::LoopOne), None);
    assert_eq!(manual_next(Some(0), 3, LoopMode::NoLoop), Some(1));
    assert_eq!(manual_next(None, 3, LoopMode::NoLoop), Some(0));

    assert_eq!(manual_prev(Some(0), 3, LoopMode::LoopAll), Some(2));
    assert_eq!(manual_prev(Some(0), 3, LoopMode::NoLoop), None);
    assert_eq!(manual_prev(Some(2), 3, LoopMode::LoopOne), Some(1));

    assert_eq!(manual_next(None, 0, LoopMode::LoopAll), None);
    assert_eq!(manual_prev(None, 0, LoopMode::LoopAll), None);
}

#[test]
fn auto_advance_follows_loop_mode() {
    assert_eq!(auto_advance(Some(1), 3, LoopMode::LoopOne), Some(1));
    assert_eq!(auto_advance(Some(2), 3, LoopMode::LoopAll), Some(0));
    assert_eq!(auto_advance(Some(1), 3, LoopMode::NoLoop), Some(2));
    assert_eq!(auto_advance(Some(2), 3, LoopMode::NoLoop), None);
    assert_eq!(auto_advance(None, 3, LoopMode::NoLoop), Some(0));
    assert_eq!(auto_advance(Some(0), 0, LoopMode::LoopAll), None);
}

#[test]
fn new_app_opens_active_playlist_and_its_current_track() {
    let dir = tempfile::tempdir().unwrap();
    let tracks = audio_files(dir.path(), &["a.mp3", "b.mp3"]);
    let path = dir.path().join("playlists.json");
    {
        let mut store = PlaylistStore::load(&path);
        store.create("Road Trip").unwrap();
        store.add_tracks("Road Trip", tracks).unwrap();
        store.set_current("Road Trip", Some(1)).unwrap();
        store.set_active("Road Trip").unwrap();
    }

    let mut app = App::new(PlaylistStore::load(&path));
    app.open(&app.store.active().to_string());

    assert_eq!(app.open_playlist, "Road Trip");
    assert_eq!(app.playlist_cursor, 1);
    assert_eq!(app.selected, 1);
}

#[test]
fn play_selected_records_current_and_plays() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    let (mut engine, mixer) = fake_engine(70);

    app.selected = 1;
    app.play_selected(&mut engine);

    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(mixer.borrow().opened, vec![tracks[1].clone()]);
    assert_eq!(current_of(&app, DEFAULT_PLAYLIST), Some(1));
    assert_eq!(app.now_playing.as_deref(), Some(DEFAULT_PLAYLIST));
    assert_eq!(app.playing_index_in_open(), Some(1));
    assert_eq!(app.popup, Popup::None);
}

#[test]
fn playing_a_missing_file_shows_error_and_next_skips_it() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    fs::remove_file(&tracks[0]).unwrap();
    let (mut engine, mixer) = fake_engine(70);

    app.play_selected(&mut engine);
    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert!(matches!(app.popup, Popup::Error(_)));
    assert_eq!(current_of(&app, DEFAULT_PLAYLIST), Some(0));

    app.close_popup();
    app.next(&mut engine);
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(mixer.borrow().opened, vec![tracks[1].clone()]);
}

#[test]
fn missing_tracks_are_listed_with_a_marker() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    fs::remove_file(&tracks[2]).unwrap();

    let rows = app.track_rows(&UiSettings::default());
    assert_eq!(rows.len(), 3);
    assert!(!rows[0].starts_with("(missing)"));
    assert!(rows[2].starts_with("(missing)"));
}

#[test]
fn toggle_play_pause_starts_then_pauses_then_resumes() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let (mut engine, _) = fake_engine(70);

    app.toggle_play_pause(&mut engine);
    assert_eq!(engine.state(), PlaybackState::Playing);
    app.toggle_play_pause(&mut engine);
    assert_eq!(engine.state(), PlaybackState::Paused);
    app.toggle_play_pause(&mut engine);
    assert_eq!(engine.state(), PlaybackState::Playing);

    app.stop(&mut engine);
    assert_eq!(engine.state(), PlaybackState::Stopped);
}

#[test]
fn next_and_prev_respect_loop_mode() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    let (mut engine, mixer) = fake_engine(70);

    app.selected = 2;
    app.play_selected(&mut engine);
    app.next(&mut engine);
    assert_eq!(current_of(&app, DEFAULT_PLAYLIST), Some(0));
    app.prev(&mut engine);
    assert_eq!(current_of(&app, DEFAULT_PLAYLIST), Some(2));

    app.loop_mode = LoopMode::NoLoop;
    let opened = mixer.borrow().opened.len();
    app.next(&mut engine);
    assert_eq!(current_of(&app, DEFAULT_PLAYLIST), Some(2));
    assert_eq!(mixer.borrow().opened.len(), opened);
    assert_eq!(mixer.borrow().opened.last(), Some(&tracks[2]));
}

#[test]
fn tick_advances_when_track_finishes() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    let (mut engine, mixer) = fake_engine(70);

    app.play_selected(&mut engine);
    app.tick(&mut engine);
    assert_eq!(mixer.borrow().opened.len(), 1);

    mixer.borrow_mut().drained = true;
    app.tick(&mut engine);
    assert_eq!(mixer.borrow().opened, vec![tracks[0].clone(), tracks[1].clone()]);
    assert_eq!(current_of(&app, DEFAULT_PLAYLIST), Some(1));
    assert_eq!(app.selected, 1);
}

#[test]
fn tick_repeats_in_loop_one_and_stops_at_end_in_no_loop() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    let (mut engine, mixer) = fake_engine(70);

    app.loop_mode = LoopMode::LoopOne;
    app.selected = 2;
    app.play_selected(&mut engine);
    mixer.borrow_mut().drained = true;
    app.tick(&mut engine);
    assert_eq!(mixer.borrow().opened, vec![tracks[2].clone(), tracks[2].clone()]);

    app.loop_mode = LoopMode::NoLoop;
    mixer.borrow_mut().drained = true;
    app.tick(&mut engine);
    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert_eq!(mixer.borrow().opened.len(), 2);
}

#[test]
fn tick_ignores_a_paused_drained_stream() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let (mut engine, mixer) = fake_engine(70);

    app.play_selected(&mut engine);
    engine.pause();
    mixer.borrow_mut().drained = true;
    app.tick(&mut engine);

    assert_eq!(engine.state(), PlaybackState::Paused);
    assert_eq!(mixer.borrow().opened.len(), 1);
}

#[test]
fn playback_follows_the_playlist_it_started_from() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let trip = audio_files(dir.path(), &["x.mp3", "y.mp3"]);
    app.create_playlist("Road Trip");
    app.add_paths(&trip);
    let (mut engine, mixer) = fake_engine(70);

    assert_eq!(app.open_playlist, "Road Trip");
    app.play_selected(&mut engine);

    app.open(DEFAULT_PLAYLIST);
    app.next(&mut engine);

    assert_eq!(mixer.borrow().opened.last(), Some(&trip[1]));
    assert_eq!(current_of(&app, "Road Trip"), Some(1));
    assert_eq!(current_of(&app, DEFAULT_PLAYLIST), None);
    assert_eq!(app.playing_index_in_open(), None);
}

#[test]
fn deleting_the_playing_playlist_stops_playback() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let trip = audio_files(dir.path(), &["x.mp3"]);
    app.create_playlist("Road Trip");
    app.add_paths(&trip);
    let (mut engine, _) = fake_engine(70);
    app.play_selected(&mut engine);

    app.focus = Focus::Tracks;
    app.begin_delete_playlist();
    assert_eq!(
        app.popup,
        Popup::Confirm(ConfirmAction::DeletePlaylist("Road Trip".into()))
    );
    app.confirm(&mut engine, true);

    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert_eq!(app.now_playing, None);
    assert_eq!(app.open_playlist, DEFAULT_PLAYLIST);
    assert!(!app.store.contains("Road Trip"));
    assert_eq!(app.popup, Popup::None);
}

#[test]
fn declining_the_delete_keeps_the_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let (mut engine, _) = fake_engine(70);
    app.create_playlist("Keep");

    app.begin_delete_playlist();
    app.confirm(&mut engine, false);

    assert!(app.store.contains("Keep"));
    assert_eq!(app.popup, Popup::None);
}

#[test]
fn deleting_default_shows_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let (mut engine, _) = fake_engine(70);

    app.delete_playlist(&mut engine, DEFAULT_PLAYLIST);

    assert!(matches!(app.popup, Popup::Error(_)));
    assert_eq!(app.store.tracks(DEFAULT_PLAYLIST).len(), 3);
}

#[test]
fn add_paths_counts_skipped_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(PlaylistStore::load(dir.path().join("playlists.json")));
    let files = audio_files(dir.path(), &["one.mp3", "notes.txt", "two.M4A"]);

    app.add_paths(&files);

    assert_eq!(
        app.store.tracks(DEFAULT_PLAYLIST),
        &[files[0].clone(), files[2].clone()]
    );
    assert_eq!(app.status.as_deref(), Some("Added 2 tracks (1 skipped)"));
}

#[test]
fn typed_directory_path_adds_its_audio_files() {
    let dir = tempfile::tempdir().unwrap();
    let music = dir.path().join("music");
    fs::create_dir(&music).unwrap();
    let files = audio_files(&music, &["b.ogg", "a.wav", "cover.jpg"]);
    let mut app = App::new(PlaylistStore::load(dir.path().join("playlists.json")));

    app.begin_add_path();
    for c in music.to_string_lossy().chars() {
        app.push_input_char(c);
    }
    app.submit_input();

    assert_eq!(
        app.store.tracks(DEFAULT_PLAYLIST),
        &[files[1].clone(), files[0].clone()]
    );
    assert_eq!(app.status.as_deref(), Some("Added 2 tracks (1 skipped)"));
}

#[test]
fn remove_selected_track_keeps_selection_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());

    let (mut engine, _) = fake_engine(70);

    app.selected = 2;
    app.remove_selected_track(&mut engine);

    assert_eq!(
        app.store.tracks(DEFAULT_PLAYLIST),
        &[tracks[0].clone(), tracks[1].clone()]
    );
    assert_eq!(app.selected, 1);
}

#[test]
fn removing_the_playing_track_stops_playback() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let (mut engine, _) = fake_engine(70);

    app.play_index(&mut engine, DEFAULT_PLAYLIST, 1);
    app.selected = 1;
    app.remove_selected_track(&mut engine);

    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert_eq!(app.now_playing, None);
    assert_eq!(app.playing_index_in_open(), None);
}

#[test]
fn removing_another_track_keeps_playing() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    let (mut engine, _) = fake_engine(70);

    app.play_index(&mut engine, DEFAULT_PLAYLIST, 2);
    app.selected = 0;
    app.remove_selected_track(&mut engine);

    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(app.playing_index_in_open(), Some(1));
    assert_eq!(app.open_tracks()[1], tracks[2]);
}

#[test]
fn new_playlist_from_input_popup_is_created_and_opened() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());

    app.begin_new_playlist();
    for c in " Chill ".chars() {
        app.push_input_char(c);
    }
    app.push_input_char('x');
    app.pop_input_char();
    app.submit_input();

    assert_eq!(app.open_playlist, "Chill");
    assert_eq!(app.store.active(), "Chill");
    assert_eq!(app.playlist_cursor, 1);
    assert_eq!(app.popup, Popup::None);

    app.create_playlist("Chill");
    assert!(matches!(app.popup, Popup::Error(_)));
}

#[test]
fn rename_follows_open_and_playing_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let trip = audio_files(dir.path(), &["x.mp3"]);
    app.create_playlist("Road Trip");
    app.add_paths(&trip);
    let (mut engine, _) = fake_engine(70);
    app.play_selected(&mut engine);

    app.begin_rename_playlist();
    assert_eq!(
        app.popup,
        Popup::Input {
            purpose: InputPurpose::RenamePlaylist("Road Trip".into()),
            buffer: "Road Trip".into(),
        }
    );
    app.pop_input_char();
    app.pop_input_char();
    app.pop_input_char();
    app.pop_input_char();
    for c in "Drive".chars() {
        app.push_input_char(c);
    }
    app.submit_input();

    assert_eq!(app.open_playlist, "Road Drive");
    assert_eq!(app.now_playing.as_deref(), Some("Road Drive"));
    assert_eq!(app.store.active(), "Road Drive");
    assert_eq!(app.playing_index_in_open(), Some(0));
}

#[test]
fn activate_on_playlists_opens_then_plays() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, tracks) = app_with_tracks(dir.path());
    app.create_playlist("Empty");
    let (mut engine, mixer) = fake_engine(70);

    app.focus = Focus::Playlists;
    app.cursor_top();
    app.activate(&mut engine);
    assert_eq!(app.open_playlist, DEFAULT_PLAYLIST);
    assert_eq!(app.focus, Focus::Tracks);

    app.cursor_bottom();
    app.activate(&mut engine);
    assert_eq!(mixer.borrow().opened, vec![tracks[2].clone()]);
}

#[test]
fn cursors_wrap_within_their_lists() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());

    app.cursor_up();
    assert_eq!(app.selected, 2);
    app.cursor_down();
    assert_eq!(app.selected, 0);

    app.toggle_focus();
    assert_eq!(app.focus, Focus::Playlists);
    app.cursor_down();
    assert_eq!(app.playlist_cursor, 0);
}

#[test]
fn volume_keys_step_and_clamp() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = app_with_tracks(dir.path());
    let (mut engine, _) = fake_engine(97);

    app.volume_up(&mut engine, 5);
    assert_eq!(engine.volume(), 100);
    app.volume_down(&mut engine, 5);
    assert_eq!(engine.volume(), 95);

    let (mut engine, _) = fake_engine(3);
    app.volume_down(&mut engine, 5);
    assert_eq!(engine.volume(), 0);
}

#[test]
fn cycle_loop_mode_cycles_three_states() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(PlaylistStore::load(dir.path().join("playlists.json")));
    assert_eq!(app.loop_mode, LoopMode::LoopAll);

    app.cycle_loop_mode();
    assert_eq!(app.loop_mode, LoopMode::LoopOne);
    app.cycle_loop_mode();
    assert_eq!(app.loop_mode, LoopMode::NoLoop);
    app.cycle_loop_mode();
    assert_eq!(app.loop_mode, LoopMode::LoopAll);
}

#[test]
fn metadata_popup_needs_a_track() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(PlaylistStore::load(dir.path().join("playlists.json")));

    app.toggle_metadata_popup();
    assert_eq!(app.popup, Popup::None);

    let files = audio_files(dir.path(), &["song.mp3"]);
    app.add_paths(&files);
    app.toggle_metadata_popup();
    assert_eq!(app.popup, Popup::Metadata);
    assert_eq!(app.metadata.get_or_load(&files[0]).title, "song.mp3");
    app.toggle_metadata_popup();
    assert_eq!(app.popup, Popup::None);
}

#[test]
fn failed_save_still_applies_the_change() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();
    let mut app = App::new(PlaylistStore::load(blocker.join("playlists.json")));

    app.create_playlist("Offline");

    assert!(matches!(app.popup, Popup::Error(_)));
    assert!(app.store.contains("Offline"));
    assert_eq!(app.open_playlist, "Offline");
}
