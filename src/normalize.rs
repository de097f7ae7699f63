//! Normalization utilities.
//!
//! Pure helpers shared by the scorers, the conflict detector and the
//! engine: date parsing, attribute-list tokenizing, interval overlap and
//! the weather-fitness rule. No state, no I/O.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

/// Sentinel cell value meaning "no value".
pub const EMPTY_SENTINEL: &str = "-";

/// Date-only layouts tried in order. Numeric dates are read month-first
/// whatever the separator, falling back to day-first when the month-first
/// reading is impossible.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%m.%d.%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%B-%Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Best-effort parse of a free-text date.
///
/// Returns `None` on empty input or when no known layout matches.
/// `None` means "unknown"; callers must never substitute epoch or today.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_roster::normalize::parse_date;
///
/// assert_eq!(parse_date("2026-02-05"), NaiveDate::from_ymd_opt(2026, 2, 5));
/// assert_eq!(parse_date("5 Feb 2026"), NaiveDate::from_ymd_opt(2026, 2, 5));
/// assert_eq!(parse_date(""), None);
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    if let Some(date) = parse_compact(s) {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// `YYYYMMDD` with no separators.
fn parse_compact(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let spaced = format!("{}-{}-{}", &s[..4], &s[4..6], &s[6..]);
    NaiveDate::parse_from_str(&spaced, "%Y-%m-%d").ok()
}

/// Splits a comma-separated attribute list into a set of lowercase tokens.
///
/// Empty tokens and the `-` sentinel are dropped.
pub fn normalize_list(raw: &str) -> BTreeSet<String> {
    tokens(raw).map(str::to_lowercase).collect()
}

/// Splits a comma-separated identifier list, keeping order and case.
///
/// Identifiers are matched case-insensitively elsewhere but reported as
/// written.
pub fn split_ids(raw: &str) -> Vec<String> {
    tokens(raw).map(str::to_string).collect()
}

fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != EMPTY_SENTINEL)
}

/// Inclusive interval overlap on dates.
///
/// Any unknown bound makes the ranges non-overlapping.
pub fn ranges_overlap(
    a_start: Option<NaiveDate>,
    a_end: Option<NaiveDate>,
    b_start: Option<NaiveDate>,
    b_end: Option<NaiveDate>,
) -> bool {
    match (a_start, a_end, b_start, b_end) {
        (Some(a_start), Some(a_end), Some(b_start), Some(b_end)) => {
            a_start <= b_end && b_start <= a_end
        }
        _ => false,
    }
}

/// Weather fitness of an equipment unit for a job forecast.
///
/// Only rain is gated: a `rainy`/`rain` forecast needs an IP rating or an
/// explicit rain rating. Any other forecast (including `stormy`) passes.
pub fn weather_ok(resistance: &str, weather: &str) -> bool {
    let weather = weather.trim().to_lowercase();
    if weather.is_empty() {
        return true;
    }

    if weather == "rainy" || weather == "rain" {
        let resistance = resistance.trim().to_lowercase();
        return resistance.contains("ip") || resistance.contains("rain");
    }

    true
}

/// Case-insensitive, trimmed text equality.
#[inline]
pub fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
