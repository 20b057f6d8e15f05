use crate::config;

/// Load the config file, falling back to defaults when it is broken.
///
/// The logger is not installed yet when this runs, so any problem is
/// returned for the caller to log once it is.
pub fn load_settings() -> (config::Settings, Option<String>) {
    let path = config::default_config_path();
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config {}, using defaults: {msg}", path.display())),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config {}, using defaults: {e}", path.display())),
        ),
    }
}
