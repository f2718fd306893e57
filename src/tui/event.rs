//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::auth::IdentityProvider;
use crate::error::HabitError;
use crate::storage::HabitStore;
use crate::tui::app::App;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Complete the highlighted habit for the selected date.
    Complete,
    /// Select the previous day.
    PreviousDay,
    /// Select the next day.
    NextDay,
    /// Select today.
    Today,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<S: HabitStore, I: IdentityProvider>(
    app: &mut App<'_, S, I>,
) -> Result<Option<Action>, HabitError> {
    if !event::poll(Duration::from_millis(100))? {
        return Ok(None);
    }

    let Event::Key(key) = event::read()? else {
        return Ok(None);
    };

    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        },
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        },
        KeyCode::Char('g') | KeyCode::Home => {
            app.select_first();
            None
        },
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            None
        },

        // Date selection
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PreviousDay),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextDay),
        KeyCode::Char('t') => Some(Action::Today),

        KeyCode::Char('f') | KeyCode::Tab => {
            app.cycle_category();
            None
        },

        KeyCode::Char(' ' | 'c') | KeyCode::Enter => Some(Action::Complete),

        KeyCode::Char('?') => {
            app.show_help();
            None
        },

        _ => None,
    };

    Ok(action)
}
