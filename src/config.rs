//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to load configuration from disk.

mod load;
mod schema;

pub use load::default_config_path;
pub use schema::*;

/// Data directory used when the config does not name one. The config file
/// itself is always looked up here.
pub const DEFAULT_DATA_DIR: &str = "music_player_data";
