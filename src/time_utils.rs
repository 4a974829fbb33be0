// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date handling and week bucketing.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Weekday names in Monday-first display order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Week bucket label for a date: `YYYY-Www` with a Sunday-based week number.
///
/// Days before the first Sunday of the year land in week `00`.
pub fn week_label(date: NaiveDate) -> String {
    date.format("%Y-W%U").to_string()
}

/// Monday of the (Monday..Sunday) week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// English name of the weekday of `date`.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// Parse a weekday name (case-insensitive, surrounding whitespace ignored).
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim();
    WEEKDAY_NAMES
        .iter()
        .position(|d| d.eq_ignore_ascii_case(name))
        .and_then(|i| Weekday::try_from(i as u8).ok())
}

/// Canonical spelling of a weekday name ("monday " becomes "Monday").
/// Unrecognised names are returned trimmed.
pub fn canonical_day(name: &str) -> String {
    match parse_weekday(name) {
        Some(day) => WEEKDAY_NAMES[day.num_days_from_monday() as usize].to_string(),
        None => name.trim().to_string(),
    }
}

/// Parse a stored date leniently.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` (what dataframe exports write
/// for datetime columns) and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    // Fall back to the leading calendar date, e.g. "2024-01-15T10:00:00".
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
