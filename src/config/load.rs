use std::path::{Path, PathBuf};

use super::DEFAULT_DATA_DIR;
use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads the optional config file and falls back to struct
/// defaults. The environment is never consulted.
impl Settings {
    /// Load settings from the fixed config path.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(&default_config_path())
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ::config::ConfigError> {
        let cfg = ::config::Config::builder()
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .build()?;
        cfg.try_deserialize()
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.ui.tick_ms == 0 {
            return Err("ui.tick_ms must be >= 1".to_string());
        }
        if self.ui.volume_step == 0 {
            return Err("ui.volume_step must be >= 1".to_string());
        }
        if self.audio.default_volume > 100 {
            return Err("audio.default_volume must be <= 100".to_string());
        }
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err("storage.data_dir must not be empty".to_string());
        }
        if self.storage.playlists_file.trim().is_empty() {
            return Err("storage.playlists_file must not be empty".to_string());
        }
        Ok(())
    }
}

/// The config file always lives next to the default playlist document:
/// `music_player_data/config.toml`.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR).join("config.toml")
}
