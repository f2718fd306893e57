use chrono::NaiveDate;
use colored::{ColoredString, Colorize};

use crate::auth::Identity;
use crate::core::long_date;
use crate::engine::{current_run, streak, HabitStats, HabitView};
use crate::habits::{Habit, DEFAULT_COLOR};
use crate::service::{CategorySummary, CompletionOutcome, Progress};

const GAUGE_WIDTH: usize = 20;

/// Parse `#RGB` or `#RRGGBB` into its components.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match digits.len() {
        3 => {
            let mut parts = digits.chars().map(|c| channel(&c.to_string().repeat(2)));
            Some((parts.next()??, parts.next()??, parts.next()??))
        },
        6 => Some((
            channel(digits.get(0..2)?)?,
            channel(digits.get(2..4)?)?,
            channel(digits.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// A colored bullet in the habit's color.
fn swatch(color: &str) -> ColoredString {
    let (r, g, b) = hex_to_rgb(color)
        .or_else(|| hex_to_rgb(DEFAULT_COLOR))
        .unwrap_or((229, 0, 70));
    "●".truecolor(r, g, b)
}

fn streak_label(count: usize) -> String {
    format!("🔥 {count} day streak")
}

/// Format the habit list for a selected date.
pub fn format_habit_list_pretty(views: &[HabitView], selected: NaiveDate) -> String {
    let title = long_date(selected);
    if views.is_empty() {
        return format!("{title} (0 habits)\n  No habits yet");
    }

    let mut output = format!("{} ({} habits)\n", title.bold(), views.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for view in views {
        let check = if view.completed {
            "[x]".green()
        } else {
            "[ ]".white()
        };

        let name = if view.completed {
            view.name.strikethrough().dimmed().to_string()
        } else {
            view.name.bold().to_string()
        };

        let mut line = format!("{} {} {} {}", check, swatch(&view.color), view.icon, name);
        line.push_str(&format!("  {}", view.category.dimmed()));

        if let Some(count) = view.streak {
            line.push_str(&format!("  {}", streak_label(count).yellow()));
        }

        line.push_str(&format!("  {}", short_id(&view.id).dimmed()));
        output.push_str(&line);
        output.push('\n');
    }

    output
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Format a single habit as a detail view.
pub fn format_habit_pretty(habit: &Habit, today: NaiveDate) -> String {
    let check = if habit.is_completed_on(today) {
        "[x]".green()
    } else {
        "[ ]".white()
    };

    let mut output = format!(
        "{} {} {} {}\n",
        check,
        swatch(habit.display_color()),
        habit.display_icon(),
        habit.name.bold()
    );
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), habit.id));
    output.push_str(&format!("  {}: {}\n", "Category".dimmed(), habit.category));
    output.push_str(&format!(
        "  {}: {}, {} day{}\n",
        "Schedule".dimmed(),
        habit.frequency,
        habit.target_days,
        if habit.target_days == 1 { "" } else { "s" }
    ));

    if let Some(description) = &habit.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }

    output.push_str(&format!("  {}: {}\n", "Color".dimmed(), habit.display_color()));

    if habit.is_archived {
        output.push_str(&format!("  {}: {}\n", "Status".dimmed(), "archived".yellow()));
    }

    match streak(habit) {
        Some(count) => output.push_str(&format!("  {}: {}\n", "Streak".dimmed(), streak_label(count))),
        None => output.push_str(&format!("  {}: none yet\n", "Streak".dimmed())),
    }

    let run = current_run(&habit.completed_dates, today);
    if run > 0 {
        output.push_str(&format!("  {}: {} day{}\n", "Current run".dimmed(), run, if run == 1 { "" } else { "s" }));
    }

    if let Some(last) = habit.completed_dates.iter().max() {
        output.push_str(&format!(
            "  {}: {}\n",
            "Last completed".dimmed(),
            last.format("%Y-%m-%d %H:%M")
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        habit.created_at.format("%Y-%m-%d %H:%M")
    ));

    if let Some(updated) = &habit.updated_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Updated".dimmed(),
            updated.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}

/// Format the result of a completion request.
pub fn format_completion_pretty(habit: &Habit, outcome: CompletionOutcome) -> String {
    match outcome {
        CompletionOutcome::Completed => {
            let mut line = format!("{} Completed: {}", "✓".green(), habit.name.bold());
            if let Some(count) = streak(habit) {
                line.push_str(&format!("  {}", streak_label(count).yellow()));
            }
            line
        },
        CompletionOutcome::AlreadyCompleted => {
            format!("{} Already completed today: {}", "·".dimmed(), habit.name.bold())
        },
    }
}

/// Format per-habit statistics as a table.
pub fn format_stats_pretty(stats: &[HabitStats]) -> String {
    if stats.is_empty() {
        return "Statistics (0 habits)\n  No habits yet".to_string();
    }

    let name_width = stats
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut output = format!("{} ({} habits)\n", "Statistics".bold(), stats.len());
    output.push_str(&format!(
        "{:<name_width$}  {:>5}  {:>5}  {:>7}  {:>4}  {:>4}\n",
        "Habit", "Done", "Days", "Rate", "Run", "Best"
    ));
    output.push_str(&"─".repeat(name_width + 38));
    output.push('\n');

    for s in stats {
        let rate = format!("{:.1}%", s.completion_rate);
        let rate = if s.completion_rate >= 80.0 {
            rate.green()
        } else if s.completion_rate >= 40.0 {
            rate.yellow()
        } else {
            rate.normal()
        };

        output.push_str(&format!(
            "{:<name_width$}  {:>5}  {:>5}  {:>7}  {:>4}  {:>4}\n",
            s.name, s.completed_count, s.total_days, rate, s.current_run, s.longest_run
        ));
    }

    output
}

/// Format today's progress with a text gauge.
pub fn format_progress_pretty(progress: &Progress) -> String {
    let filled = usize::from(progress.percentage) * GAUGE_WIDTH / 100;
    let bar = format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(GAUGE_WIDTH - filled).dimmed()
    );

    let header = match &progress.category {
        Some(category) => format!("{} · {category}", long_date(progress.date)),
        None => long_date(progress.date),
    };

    format!(
        "{}\n  [{}] {}%  {} of {} habits completed",
        header.bold(),
        bar,
        progress.percentage,
        progress.completed,
        progress.total
    )
}

/// Format the category list.
pub fn format_categories_pretty(categories: &[CategorySummary]) -> String {
    let mut output = format!("Categories ({})\n", categories.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for category in categories {
        let name = if category.suggested {
            category.name.bold()
        } else {
            category.name.cyan()
        };
        output.push_str(&format!("  {:<20} {}\n", name, category.habits.to_string().dimmed()));
    }

    output
}

/// Format the signed-in identity.
pub fn format_identity_pretty(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) if identity.email_verified => {
            format!("Signed in as {}", identity.user_id.bold())
        },
        Some(identity) => format!(
            "Signed in as {} ({})",
            identity.user_id.bold(),
            "email not verified".yellow()
        ),
        None => "Not signed in".to_string(),
    }
}
