//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::auth::IdentityProvider;
use crate::core::long_date;
use crate::output::hex_to_rgb;
use crate::storage::HabitStore;
use crate::tui::app::{App, StatusLevel};

const HELP: &str = "j/k:move | h/l:day | t:today | f:category | space:complete | ?:help | q:quit";

/// Render the application UI.
pub fn render<S: HabitStore, I: IdentityProvider>(frame: &mut Frame<'_>, app: &App<'_, S, I>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Date header
            Constraint::Length(3), // Progress gauge
            Constraint::Min(0),    // Habit list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_progress(frame, app, chunks[1]);
    render_list(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_header<S: HabitStore, I: IdentityProvider>(frame: &mut Frame<'_>, app: &App<'_, S, I>, area: Rect) {
    let dashboard = &app.dashboard;
    let mut spans = vec![
        Span::raw(" ◀ "),
        Span::styled(
            long_date(dashboard.selected()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ▶ "),
    ];
    if dashboard.selected() == dashboard.today() {
        spans.push(Span::styled("(today)", Style::default().fg(Color::Green)));
    }
    if let Some(category) = &app.category {
        spans.push(Span::styled(
            format!("  [{category}]"),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Habits ")
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_progress<S: HabitStore, I: IdentityProvider>(frame: &mut Frame<'_>, app: &App<'_, S, I>, area: Rect) {
    let percentage = app.dashboard.percentage();

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Today's progress "))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(u16::from(percentage))
        .label(format!("{percentage}%"));

    frame.render_widget(gauge, area);
}

fn render_list<S: HabitStore, I: IdentityProvider>(frame: &mut Frame<'_>, app: &App<'_, S, I>, area: Rect) {
    let views = app.dashboard.views();

    if views.is_empty() {
        let empty = Paragraph::new("  No habits yet. Add one with `habitual add <name>`.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'_>> = views
        .iter()
        .map(|view| {
            let color = hex_to_rgb(&view.color)
                .map_or(Color::Red, |(r, g, b)| Color::Rgb(r, g, b));

            let (check, check_color) = if view.completed {
                ("[x]", Color::Green)
            } else {
                ("[ ]", Color::White)
            };

            let name_style = if view.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled("▌", Style::default().fg(color)),
                Span::styled(format!("{check} "), Style::default().fg(check_color)),
                Span::raw(format!("{} ", view.icon)),
                Span::styled(view.name.as_str(), name_style),
                Span::styled(
                    format!("  {}", view.category),
                    Style::default().fg(Color::DarkGray),
                ),
            ];

            if let Some(count) = view.streak {
                spans.push(Span::styled(
                    format!("  🔥 {count} day streak"),
                    Style::default().fg(Color::Yellow),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar<S: HabitStore, I: IdentityProvider>(frame: &mut Frame<'_>, app: &App<'_, S, I>, area: Rect) {
    let (text, color) = app.status.as_ref().map_or((HELP, Color::DarkGray), |status| {
        let color = match status.level {
            StatusLevel::Info => Color::DarkGray,
            StatusLevel::Warning => Color::Yellow,
            StatusLevel::Error => Color::Red,
        };
        (status.text.as_str(), color)
    });

    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}
