//! Terminal User Interface (TUI) for habitual.
//!
//! An interactive dashboard: pick a date, check habits off, and watch today's
//! progress. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Status, StatusLevel};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::auth::IdentityProvider;
use crate::error::HabitError;
use crate::service::HabitService;
use crate::storage::HabitStore;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if signed out, or the TUI fails to initialize or run.
pub fn run<S: HabitStore, I: IdentityProvider>(service: &HabitService<S, I>) -> Result<(), HabitError> {
    // Subscribe before touching the terminal so auth errors print normally.
    let mut app = App::new(service)?;

    enable_raw_mode()
        .map_err(|e| HabitError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| HabitError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| HabitError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, S: HabitStore, I: IdentityProvider>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, S, I>,
) -> Result<(), HabitError> {
    while !app.should_quit {
        app.sync();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| HabitError::Config(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => app.should_quit = true,
                event::Action::Complete => app.complete_selected(),
                event::Action::PreviousDay => app.shift_date(-1),
                event::Action::NextDay => app.shift_date(1),
                event::Action::Today => app.go_to_today(),
            }
        }
    }

    Ok(())
}
