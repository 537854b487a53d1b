//! Terminal dashboard for the stats feed
//!
//! Renders the four counters animated from the previous snapshot to the
//! current one, the connection state, and captured logs.

mod animation;
mod app;
mod constants;
pub mod log_capture;
mod ui;

pub use animation::{CounterAnimation, CounterSet};
pub use app::TuiApp;
pub use log_capture::{LogBuffer, LogMakeWriter};
pub use ui::render_ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Setup the terminal for TUI rendering
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    // Clear first so escape sequences don't leak to the shell
    terminal.clear()?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Run the TUI event loop
///
/// Runs until the user presses 'q', Esc or Ctrl+C, or until a shutdown signal
/// arrives on `shutdown_rx`. When the TUI exits it notifies `shutdown_tx`.
///
/// # Errors
/// Returns an error if terminal operations fail
pub async fn run_tui(
    mut app: TuiApp,
    shutdown_tx: mpsc::Sender<()>,
    mut shutdown_rx: mpsc::Receiver<()>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;

    // Ensure terminal cleanup on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_app(&mut terminal, &mut app, &mut shutdown_rx).await;

    restore_terminal(&mut terminal)?;

    let _ = shutdown_tx.send(()).await;

    result
}

/// Frame interval: fast while a transition runs, slow otherwise
fn frame_interval(app: &TuiApp, now: Instant) -> Duration {
    if app.is_animating(now) {
        constants::ANIMATION_FRAME
    } else {
        constants::IDLE_FRAME
    }
}

/// Main TUI event loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut TuiApp,
    shutdown_rx: &mut mpsc::Receiver<()>,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.update(now);
        terminal.draw(|f| ui::render_ui(f, app, now))?;

        tokio::select! {
            _ = shutdown_rx.recv() => {
                break;
            }
            _ = tokio::time::sleep(frame_interval(app, now)) => {
                if event::poll(Duration::from_millis(0))?
                    && let Event::Key(key) = event::read()?
                    && key.kind == KeyEventKind::Press
                {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            break;
                        }
                        KeyCode::Char('l') => app.toggle_log_fullscreen(),
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(())
}
