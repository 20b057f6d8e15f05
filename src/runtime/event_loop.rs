use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Popup};
use crate::audio::{AudioOutput, PlaybackEngine};
use crate::config;
use crate::library::AudioFormat;
use crate::ui::{self, PlaybackView};

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// What the loop should do after a key was handled.
enum Flow {
    Continue,
    /// A native dialog drew over the terminal; repaint everything.
    Repaint,
    Quit,
}

/// Main terminal event loop: handles input, UI drawing and the playback
/// timer. Returns `Ok(())` when the user quits.
pub fn run<O: AudioOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut PlaybackEngine<O>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    let tick = Duration::from_millis(settings.ui.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        let rows = app.track_rows(&settings.ui);
        let view = playback_view(app, engine);
        terminal.draw(|f| ui::draw(f, app, &rows, &view, &settings.ui))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key_event(key, settings, app, engine, state) {
                    Flow::Continue => {}
                    Flow::Repaint => terminal.clear()?,
                    Flow::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick {
            app.tick(engine);
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn playback_view<O: AudioOutput>(app: &App, engine: &PlaybackEngine<O>) -> PlaybackView {
    PlaybackView {
        state: engine.state(),
        elapsed: engine.get_elapsed_estimate(),
        duration: engine.duration(),
        volume: engine.volume(),
        track: engine
            .current_track()
            .and_then(|p| app.metadata.get(p))
            .cloned(),
    }
}

fn handle_key_event<O: AudioOutput>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut PlaybackEngine<O>,
    state: &mut EventLoopState,
) -> Flow {
    match app.popup {
        Popup::Error(_) => {
            app.close_popup();
            return Flow::Continue;
        }
        Popup::Input { .. } => {
            match key.code {
                KeyCode::Esc => app.close_popup(),
                KeyCode::Enter => app.submit_input(),
                KeyCode::Backspace => app.pop_input_char(),
                KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
                _ => {}
            }
            return Flow::Continue;
        }
        Popup::Confirm(_) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm(engine, true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.confirm(engine, false)
                }
                _ => {}
            }
            return Flow::Continue;
        }
        Popup::Metadata if key.code == KeyCode::Esc => {
            app.close_popup();
            return Flow::Continue;
        }
        Popup::Metadata | Popup::None => {}
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => {
            log::info!("quit requested");
            return Flow::Quit;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.cursor_bottom(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Enter => app.activate(engine),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_play_pause(engine),
        KeyCode::Char('s') => app.stop(engine),
        KeyCode::Char('l') => app.next(engine),
        KeyCode::Char('h') => app.prev(engine),
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume_up(engine, settings.ui.volume_step),
        KeyCode::Char('-') => app.volume_down(engine, settings.ui.volume_step),
        KeyCode::Char('r') => app.cycle_loop_mode(),
        KeyCode::Char('K') => app.toggle_metadata_popup(),
        KeyCode::Char('n') => app.begin_new_playlist(),
        KeyCode::Char('R') => app.begin_rename_playlist(),
        KeyCode::Char('d') => app.begin_delete_playlist(),
        KeyCode::Char('A') => app.begin_add_path(),
        KeyCode::Char('x') => app.remove_selected_track(engine),
        KeyCode::Char('a') => {
            if let Some(files) = pick_audio_files() {
                app.add_paths(&files);
            }
            return Flow::Repaint;
        }
        _ => {}
    }

    Flow::Continue
}

/// Show the platform's file picker, filtered to the playable formats.
fn pick_audio_files() -> Option<Vec<std::path::PathBuf>> {
    rfd::FileDialog::new()
        .set_title("Add songs")
        .add_filter("Audio", &AudioFormat::extensions())
        .pick_files()
}
