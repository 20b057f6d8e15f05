//! File logger setup.
//!
//! The terminal is in raw mode while the window is up, so records go to a
//! file under the data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use log::LevelFilter;

use crate::config::{LogSettings, StorageSettings};

/// Where the log file lives for `storage` and `log`.
pub fn log_path(storage: &StorageSettings, log: &LogSettings) -> PathBuf {
    storage.data_dir.join(&log.file)
}

/// Parse a level name, falling back to `info` for anything unknown.
pub fn level_filter(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Install the global logger, appending to `path` at `level`.
pub fn init(path: &Path, level: &str) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(level_filter(level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("installing logger")?;
    Ok(())
}
