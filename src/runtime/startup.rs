use crate::app::App;
use crate::audio::LoopMode;
use crate::config;
use crate::store::DEFAULT_PLAYLIST;

pub fn loop_mode(setting: config::LoopModeSetting) -> LoopMode {
    match setting {
        config::LoopModeSetting::NoLoop => LoopMode::NoLoop,
        config::LoopModeSetting::LoopAll => LoopMode::LoopAll,
        config::LoopModeSetting::LoopOne => LoopMode::LoopOne,
    }
}

/// Apply start-up preferences: navigation mode and the playlist to show.
///
/// With `resume_last_playlist` the playlist that was active at the last quit
/// is reopened with its current track selected.
pub fn apply_playback_defaults(app: &mut App, settings: &config::Settings) {
    app.loop_mode = loop_mode(settings.playback.loop_mode);

    let playlist = if settings.playback.resume_last_playlist {
        app.store.active().to_string()
    } else {
        DEFAULT_PLAYLIST.to_string()
    };
    app.open(&playlist);
    log::info!(
        "opened \"{playlist}\" ({} tracks), {}",
        app.open_tracks().len(),
        app.loop_mode.label()
    );
}
