//! Application state for the TUI.

use chrono::Duration;

use crate::auth::IdentityProvider;
use crate::core::{now, Timestamp};
use crate::engine::{Dashboard, HabitView};
use crate::error::HabitError;
use crate::service::{CompletionOutcome, HabitService, ListFilter};
use crate::storage::{HabitStore, SnapshotEvent, Subscription};

/// Severity of a status bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// Application state.
pub struct App<'a, S, I> {
    service: &'a HabitService<S, I>,
    /// Live habit snapshots; dropped with the app.
    subscription: Subscription,
    /// Category the dashboard is limited to; `None` shows all.
    pub category: Option<String>,
    /// Selected date, habit views and today's percentage.
    pub dashboard: Dashboard,
    /// Index of the highlighted habit.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<Status>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<'a, S: HabitStore, I: IdentityProvider> App<'a, S, I> {
    /// Create a new app subscribed to the signed-in user's active habits.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out or the subscription fails.
    pub fn new(service: &'a HabitService<S, I>) -> Result<Self, HabitError> {
        let subscription = service.subscribe(ListFilter::default())?;

        let mut app = Self {
            service,
            subscription,
            category: None,
            dashboard: Dashboard::new(now().date_naive()),
            selected: 0,
            status: Some(Status::info("Press ? for help")),
            should_quit: false,
        };
        app.sync();
        Ok(app)
    }

    /// Apply the newest pending snapshot and follow the day boundary.
    pub fn sync(&mut self) {
        self.sync_at(&now());
    }

    fn sync_at(&mut self, at: &Timestamp) {
        self.dashboard.set_today(at.date_naive());

        match self.subscription.latest() {
            Some(SnapshotEvent::Snapshot(habits)) => {
                self.dashboard.apply_snapshot(habits);
                self.clamp_selection();
            },
            Some(SnapshotEvent::Error(message)) => {
                self.status = Some(Status::error(message));
            },
            None => {},
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.dashboard.views().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// The highlighted habit row.
    #[must_use]
    pub fn selected_view(&self) -> Option<&HabitView> {
        self.dashboard.views().get(self.selected)
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.dashboard.views().len() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.dashboard.views().len().saturating_sub(1);
    }

    /// Move the selected date by `days`.
    pub fn shift_date(&mut self, days: i64) {
        let date = self.dashboard.selected() + Duration::days(days);
        self.dashboard.select_date(date);
        self.status = None;
    }

    /// Step the category filter through the categories in use, then back
    /// to all habits.
    pub fn cycle_category(&mut self) {
        let in_use: Vec<String> = match self.service.categories() {
            Ok(categories) => categories
                .into_iter()
                .filter(|c| c.habits > 0)
                .map(|c| c.name)
                .collect(),
            Err(e) => {
                self.status = Some(Status::error(format!("Failed to load categories: {e}")));
                return;
            },
        };

        let next = match &self.category {
            None => in_use.first().cloned(),
            Some(current) => in_use
                .iter()
                .position(|name| name == current)
                .and_then(|i| in_use.get(i + 1))
                .cloned(),
        };
        self.set_category(next);
    }

    /// Limit the dashboard to `category`, or show all habits for `None`.
    pub fn set_category(&mut self, category: Option<String>) {
        let filter = ListFilter {
            category: category.clone(),
            ..ListFilter::default()
        };
        match self.service.subscribe(filter) {
            Ok(subscription) => {
                self.subscription = subscription;
                self.status = Some(Status::info(
                    category
                        .as_deref()
                        .map_or_else(|| "All categories".to_string(), |c| format!("Category: {c}")),
                ));
                self.category = category;
                self.selected = 0;
                self.sync();
            },
            Err(e) => self.status = Some(Status::error(format!("Failed to filter habits: {e}"))),
        }
    }

    /// Jump back to today.
    pub fn go_to_today(&mut self) {
        self.dashboard.select_date(self.dashboard.today());
        self.status = None;
    }

    /// Complete the highlighted habit for the selected date.
    ///
    /// Dates other than today are refused with a warning and never reach the
    /// store.
    pub fn complete_selected(&mut self) {
        self.complete_selected_at(&now());
    }

    fn complete_selected_at(&mut self, at: &Timestamp) {
        let Some(view) = self.selected_view() else {
            return;
        };
        let (id, name) = (view.id.clone(), view.name.clone());

        if !self.dashboard.toggle_allowed(at) {
            self.status = Some(Status::warning(HabitError::NotToday.to_string()));
            return;
        }

        self.status = Some(
            match self
                .service
                .complete_habit(&id, self.dashboard.selected(), at)
            {
                Ok(CompletionOutcome::Completed) => Status::info(format!("Completed: {name}")),
                Ok(CompletionOutcome::AlreadyCompleted) => {
                    Status::info(format!("Already completed today: {name}"))
                },
                Err(e) if e.is_warning() => Status::warning(e.to_string()),
                Err(e) => Status::error(format!("Failed to complete {name}: {e}")),
            },
        );
        self.sync_at(at);
    }

    pub fn show_help(&mut self) {
        self.status = Some(Status::info(
            "j/k:move | h/l:day | t:today | f:category | space:complete | q:quit",
        ));
    }
}
