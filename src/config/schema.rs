use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Path: `music_player_data/config.toml`, relative to the working directory.
///
/// Precedence (highest wins):
/// 1) Config file (if present)
/// 2) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub playback: PlaybackSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied at start-up, 0-100.
    pub default_volume: u8,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 70,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Interval of the refresh timer that drives auto-advance and the
    /// progress gauge (milliseconds).
    pub tick_ms: u64,

    /// Volume change per `+`/`-` key press.
    pub volume_step: u8,

    /// Which track fields make up a row in the tracks list, and in what order.
    ///
    /// Example: ["artist", "title", "album"]
    pub track_fields: Vec<TrackDisplayField>,

    /// Separator used to join `track_fields`.
    pub track_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ jukebox ~ ".to_string(),
            tick_ms: 500,
            volume_step: 5,
            track_fields: vec![TrackDisplayField::Title, TrackDisplayField::Artist],
            track_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Navigation mode at start-up.
    pub loop_mode: LoopModeSetting,
    /// Reopen the playlist that was active when the player last closed.
    pub resume_last_playlist: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            loop_mode: LoopModeSetting::LoopAll,
            resume_last_playlist: true,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopModeSetting {
    #[serde(alias = "no_loop", alias = "no-loop")]
    NoLoop,
    #[serde(
        alias = "loopall",
        alias = "loop_all",
        alias = "loop-all",
        alias = "loop-around"
    )]
    LoopAll,
    #[serde(
        alias = "loopone",
        alias = "loop_one",
        alias = "loop-one",
        alias = "repeat-one"
    )]
    LoopOne,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the playlist document and the log file.
    pub data_dir: PathBuf,
    /// File name of the playlist document inside `data_dir`.
    pub playlists_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(super::DEFAULT_DATA_DIR),
            playlists_file: "playlists.json".to_string(),
        }
    }
}

impl StorageSettings {
    pub fn playlists_path(&self) -> PathBuf {
        self.data_dir.join(&self.playlists_file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum level written to the log file (`error`, `warn`, `info`,
    /// `debug`, `trace` or `off`).
    pub level: String,
    /// Log file name inside `storage.data_dir`.
    pub file: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "jukebox.log".to_string(),
        }
    }
}
