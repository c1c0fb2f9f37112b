use std::time::Duration;

use super::model::Track;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

/// Render a duration as `Y:M:W:D:HH:MM:SS.ss`, dropping leading zero units.
///
/// Seconds are always present with two decimals (`35.00`); once a larger unit
/// is non-zero every smaller unit is kept so the columns stay positional.
pub fn format_duration(total: Duration) -> String {
    let mut remaining = total.as_secs_f64();

    let years = (remaining / YEAR).floor() as u64;
    remaining %= YEAR;
    let months = (remaining / MONTH).floor() as u64;
    remaining %= MONTH;
    let weeks = (remaining / WEEK).floor() as u64;
    remaining %= WEEK;
    let days = (remaining / DAY).floor() as u64;
    remaining %= DAY;
    let hours = (remaining / HOUR).floor() as u64;
    remaining %= HOUR;
    let minutes = (remaining / MINUTE).floor() as u64;
    let seconds = remaining % MINUTE;

    let mut parts: Vec<String> = Vec::new();
    if years > 0 {
        parts.push(years.to_string());
    }
    if months > 0 || !parts.is_empty() {
        parts.push(months.to_string());
    }
    if weeks > 0 || !parts.is_empty() {
        parts.push(weeks.to_string());
    }
    if days > 0 || !parts.is_empty() {
        parts.push(days.to_string());
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{hours:02}"));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{minutes:02}"));
    }
    parts.push(format!("{seconds:05.2}"));

    parts.join(":")
}

/// Sum of known track durations, or `None` when no track carries one.
///
/// Saturates at `Duration::MAX` instead of overflowing.
pub fn total_duration(tracks: &[Track]) -> Option<Duration> {
    tracks
        .iter()
        .filter_map(|t| t.duration)
        .reduce(Duration::saturating_add)
}
