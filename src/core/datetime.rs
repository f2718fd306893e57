//! Calendar-day helpers and date parsing.
//!
//! Completion timestamps keep the UTC offset they were recorded with, so the
//! calendar day of a timestamp is always read in that offset.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, TimeZone, Weekday,
};

/// A recorded instant together with the local offset it was recorded in.
pub type Timestamp = DateTime<FixedOffset>;

/// The current local time as a [`Timestamp`].
#[must_use]
pub fn now() -> Timestamp {
    Local::now().fixed_offset()
}

/// Midnight at the start of `at`'s calendar day, in `at`'s offset.
#[must_use]
pub fn start_of_day(at: &Timestamp) -> Timestamp {
    // A fixed offset has exactly one mapping for every local time.
    at.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| at.offset().from_local_datetime(&midnight).single())
        .unwrap_or(*at)
}

/// Format a date the way the dashboard header shows it,
/// e.g. `Wednesday, January 10, 2024`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Parse a date expression relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`, `tomorrow`
/// - `3 days ago`, `2 weeks ago`, `in 3 days`
/// - `monday` (most recent Monday, today included), `last monday`
/// - `jan 10`, `january 10` (most recent occurrence)
/// - `2024-01-10`
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Some(today),
        "yesterday" => return today.pred_opt(),
        "tomorrow" => return today.succ_opt(),
        _ => {},
    }

    if let Some(date) = parse_relative_offset(&input, today) {
        return Some(date);
    }

    if let Some(date) = parse_weekday(&input, today) {
        return Some(date);
    }

    if let Some(date) = parse_month_day(&input, today) {
        return Some(date);
    }

    NaiveDate::parse_from_str(&input, "%Y-%m-%d").ok()
}

/// Parse "in X days/weeks" and "X days/weeks ago".
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    let (amount, unit, sign) = match parts.as_slice() {
        ["in", amount, unit] => (*amount, *unit, 1),
        [amount, unit, "ago"] => (*amount, *unit, -1),
        _ => return None,
    };

    let amount: i64 = amount.parse().ok()?;
    let days = match unit.trim_end_matches('s') {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        _ => return None,
    };

    today.checked_add_signed(Duration::try_days(days.checked_mul(sign)?)?)
}

/// Parse weekday names, resolving to the most recent occurrence.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (strictly_before, day_str) = input
        .strip_prefix("last ")
        .map_or((false, input), |rest| (true, rest));

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_back = (i64::from(today.weekday().num_days_from_sunday())
        - i64::from(target.num_days_from_sunday())
        + 7)
        % 7;

    if days_back == 0 && strictly_before {
        days_back = 7;
    }

    today.checked_sub_signed(Duration::days(days_back))
}

/// Parse month and day, choosing the most recent occurrence.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let month = parse_month_name(parts[0])?;
    let day: u32 = parts[1].parse().ok()?;

    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day);
    match this_year {
        Some(date) if date <= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() - 1, month, day),
    }
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}
