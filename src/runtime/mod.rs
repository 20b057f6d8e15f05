use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{PlaybackEngine, RodioOutput};
use crate::logging;
use crate::store::PlaylistStore;

mod event_loop;
mod settings;
mod startup;


/// Start the player and block until the user quits.
///
/// Fails before touching the terminal when no audio output is available.
pub fn run() -> anyhow::Result<()> {
    let (settings, config_problem) = settings::load_settings();

    let log_path = logging::log_path(&settings.storage, &settings.log);
    if let Err(e) = logging::init(&log_path, &settings.log.level) {
        eprintln!("jukebox: logging disabled: {e:#}");
    }
    if let Some(problem) = config_problem {
        log::warn!("{problem}");
        eprintln!("jukebox: {problem}");
    }
    log::info!("starting jukebox {}", env!("CARGO_PKG_VERSION"));

    let output = RodioOutput::open_default()
        .inspect_err(|e| log::error!("{e}"))
        .context("cannot start without an audio output device")?;

    let store = PlaylistStore::load(settings.storage.playlists_path());
    let mut engine = PlaybackEngine::new(output, settings.audio.default_volume);
    let mut app = App::new(store);
    startup::apply_playback_defaults(&mut app, &settings);

    enable_raw_mode()?;
    let mut terminal = set_up_or_undo(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut engine, &mut state);

    engine.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
    let save_result = app
        .store
        .save()
        .inspect_err(|e| log::error!("final save failed: {e}"));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result?;
    save_result.with_context(|| format!("saving {}", app.store.path().display()))?;
    log::info!("bye");
    Ok(())
}

/// Run `set_up`; if it fails, run `undo` before handing back the error so
/// the shell is not left in raw mode.
fn set_up_or_undo<T>(
    set_up: impl FnOnce() -> io::Result<T>,
    undo: impl FnOnce(),
) -> io::Result<T> {
    set_up().inspect_err(|_| undo())
}
