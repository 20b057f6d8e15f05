use super::*;
use crate::config::TrackDisplayField;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn track(title: &str, artist: Option<&str>) -> Track {
    Track {
        path: PathBuf::from("/tmp/Song.mp3"),
        title: title.into(),
        artist: artist.map(Into::into),
        album: None,
        duration: None,
        exists: true,
    }
}

#[test]
fn display_from_fields_formats_title_artist() {
    let fields = [TrackDisplayField::Title, TrackDisplayField::Artist];
    assert_eq!(
        display_from_fields(&track("Song", Some("Artist")), &fields, " - "),
        "Song - Artist"
    );
    assert_eq!(
        display_from_fields(&track("Song", Some("  Artist  ")), &fields, " - "),
        "Song - Artist"
    );
    assert_eq!(
        display_from_fields(&track("Song", None), &fields, " - "),
        "Song - Unknown Artist"
    );
}

#[test]
fn display_from_fields_marks_missing_files() {
    let mut t = track("Song", None);
    t.exists = false;
    assert_eq!(
        display_from_fields(&t, &[TrackDisplayField::Filename], " - "),
        "(missing) Song.mp3"
    );
}

#[test]
fn format_detection_is_by_extension_case_insensitive() {
    assert_eq!(AudioFormat::from_path(Path::new("/tmp/a.mp3")), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_path(Path::new("/tmp/a.MP3")), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_path(Path::new("/tmp/a.ogg")), Some(AudioFormat::Ogg));
    assert_eq!(AudioFormat::from_path(Path::new("/tmp/a.wav")), Some(AudioFormat::Wav));
    assert_eq!(AudioFormat::from_path(Path::new("/tmp/a.M4A")), Some(AudioFormat::M4a));
    assert!(!is_supported(Path::new("/tmp/a.flac")));
    assert!(!is_supported(Path::new("/tmp/a.txt")));
    assert!(!is_supported(Path::new("/tmp/a")));
    assert_eq!(AudioFormat::extensions(), vec!["mp3", "ogg", "wav", "m4a"]);
}

#[test]
fn read_track_falls_back_to_file_name_without_tags() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("My Song.mp3");
    fs::write(&p, b"not a real mp3").unwrap();

    let t = read_track(&p);
    assert_eq!(t.title, "My Song.mp3");
    assert_eq!(t.artist, None);
    assert_eq!(t.artist_or_unknown(), "Unknown Artist");
    assert!(t.exists);
}

#[test]
fn read_track_flags_missing_files() {
    let t = read_track(Path::new("/definitely/not/here/gone.ogg"));
    assert_eq!(t.title, "gone.ogg");
    assert!(!t.exists);
    assert_eq!(t.duration, None);
}

#[test]
fn metadata_cache_reads_once_until_invalidated() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("late.wav");

    let mut cache = MetadataCache::new();
    assert!(!cache.get_or_load(&p).exists);
    assert_eq!(cache.len(), 1);

    fs::write(&p, b"riff").unwrap();
    // Still the cached entry.
    assert!(!cache.get_or_load(&p).exists);

    cache.invalidate(&p);
    assert!(cache.get(&p).is_none());
    assert!(cache.get_or_load(&p).exists);
}

#[test]
fn expand_paths_keeps_file_order_and_walks_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("album");
    fs::create_dir_all(sub.join("disc2")).unwrap();
    fs::write(sub.join("b.ogg"), b"x").unwrap();
    fs::write(sub.join("a.MP3"), b"x").unwrap();
    fs::write(sub.join("cover.jpg"), b"x").unwrap();
    fs::write(sub.join("disc2").join("c.wav"), b"x").unwrap();

    let loose_z = dir.path().join("z.m4a");
    let loose_a = dir.path().join("a.mp3");
    let notes = dir.path().join("notes.txt");
    fs::write(&loose_z, b"x").unwrap();
    fs::write(&loose_a, b"x").unwrap();
    fs::write(&notes, b"x").unwrap();

    let out = expand_paths(&[loose_z.clone(), sub.clone(), notes, loose_a.clone()]);
    assert_eq!(
        out.accepted,
        vec![
            loose_z,
            sub.join("a.MP3"),
            sub.join("b.ogg"),
            sub.join("disc2").join("c.wav"),
            loose_a,
        ]
    );
    assert_eq!(out.skipped, 2);
}
