use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (title, artist, album, filename, path) in the
/// configured order and falls back to `title` when no parts were produced.
/// A missing artist renders as "Unknown Artist".
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.trim().to_string());
                }
            }
            TrackDisplayField::Artist => {
                let artist = track
                    .artist
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(super::model::UNKNOWN_ARTIST);
                parts.push(artist.to_string());
            }
            TrackDisplayField::Album => {
                if let Some(a) = track.album.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(name) = track.path.file_name().and_then(|s| s.to_str()) {
                    if !name.trim().is_empty() {
                        parts.push(name.to_string());
                    }
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.path.display().to_string());
            }
        }
    }

    let text = if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    };

    if track.exists {
        text
    } else {
        format!("(missing) {text}")
    }
}
