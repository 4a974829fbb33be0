// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Every stored record kind is a flat table of text cells. The row codec in
//! this module converts between typed records and rows in the canonical
//! column order of their [`RecordKind`].

pub mod body;
pub mod diet;
pub mod plan;
pub mod stats;
pub mod workout;

pub use body::BodyMetric;
pub use diet::DietEntry;
pub use plan::{DailyTargets, DayPlan, MealPlan, WeeklyPlan};
pub use stats::{
    GoalProgress, ProgressReport, ProgressStats, Trend, TrendDirection, WeeklyCompliance,
    WeeklySummary,
};
pub use workout::WorkoutEntry;

use crate::error::StoreError;
use crate::time_utils::{canonical_day, parse_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three stored collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    BodyMetrics,
    Workout,
    Diet,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::BodyMetrics, RecordKind::Workout, RecordKind::Diet];

    /// Table (worksheet) name; flat files use `<name>.csv`.
    pub fn table_name(self) -> &'static str {
        match self {
            RecordKind::BodyMetrics => "body_metrics",
            RecordKind::Workout => "workout_data",
            RecordKind::Diet => "diet_data",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RecordKind::BodyMetrics => "Body measurements and metrics",
            RecordKind::Workout => "Workout completion and progress",
            RecordKind::Diet => "Diet adherence and nutrition tracking",
        }
    }

    /// Header row, in storage order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            RecordKind::BodyMetrics => &[
                "date",
                "week",
                "weight",
                "fat_percentage",
                "muscle_mass",
                "chest",
                "waist",
                "hips",
                "arms",
                "thighs",
                "notes",
            ],
            RecordKind::Workout => &[
                "date",
                "week",
                "day",
                "workout_type",
                "completed",
                "exercises_completed",
                "total_exercises",
                "duration_minutes",
                "intensity_rating",
                "notes",
            ],
            RecordKind::Diet => &[
                "date",
                "week",
                "day",
                "adherence_score",
                "calories_estimated",
                "meals_followed",
                "total_planned_meals",
                "notes",
            ],
        }
    }

    /// Columns forming the natural key.
    pub fn key_columns(self) -> &'static [&'static str] {
        match self {
            RecordKind::BodyMetrics => &["date"],
            RecordKind::Workout | RecordKind::Diet => &["date", "day"],
        }
    }

    /// Position of `column` in [`RecordKind::columns`].
    pub fn column_index(self, column: &str) -> Option<usize> {
        self.columns().iter().position(|c| *c == column)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Natural key of a record: the date, plus the day name for workout/diet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub date: NaiveDate,
    pub day: Option<String>,
}

impl RecordKey {
    /// Extract the key from a canonical row. `None` if the date is unreadable.
    pub fn from_row(kind: RecordKind, row: &[String]) -> Option<Self> {
        let reader = RowReader::new(kind, row);
        let date = reader.date("date")?;
        let day = kind
            .column_index("day")
            .map(|_| canonical_day(reader.text("day")));
        Some(Self { date, day })
    }
}

/// A record type stored as one row of a flat table.
pub trait TabularRecord: Sized + Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    fn date(&self) -> NaiveDate;

    /// Day name for kinds keyed by (date, day).
    fn day(&self) -> Option<&str> {
        None
    }

    fn week(&self) -> &str;

    /// Recompute the derived week label from the date.
    fn refresh_week(&mut self);

    /// Fill fields the caller left for the plan to decide.
    fn apply_plan_defaults(&mut self, _plan: &WeeklyPlan) {}

    /// Check field ranges before the record reaches a backend.
    fn validate(&self) -> Result<(), StoreError>;

    /// Encode into a row in [`RecordKind::columns`] order.
    fn to_row(&self) -> Vec<String>;

    /// Decode a canonical row. Malformed optional cells become `None`;
    /// returns `None` when a field the record cannot exist without is unusable.
    fn from_row(row: &RowReader<'_>) -> Option<Self>;

    fn key(&self) -> RecordKey {
        RecordKey {
            date: self.date(),
            day: self.day().map(canonical_day),
        }
    }
}

/// Typed, lenient access to the cells of a canonical row.
pub struct RowReader<'a> {
    kind: RecordKind,
    cells: &'a [String],
}

impl<'a> RowReader<'a> {
    pub fn new(kind: RecordKind, cells: &'a [String]) -> Self {
        Self { kind, cells }
    }

    /// Raw cell text; empty for unknown or missing columns.
    pub fn text(&self, column: &str) -> &'a str {
        self.kind
            .column_index(column)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn f64(&self, column: &str) -> Option<f64> {
        parse_number(self.text(column))
    }

    /// Whole, non-negative numbers. Accepts float text such as `"5.0"`.
    pub fn u32(&self, column: &str) -> Option<u32> {
        let value = parse_number(self.text(column))?;
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return None;
        }
        Some(value as u32)
    }

    pub fn u8(&self, column: &str) -> Option<u8> {
        self.u32(column).and_then(|v| u8::try_from(v).ok())
    }

    /// Case-insensitive `true`/`false` (also `1`/`0`).
    pub fn bool(&self, column: &str) -> Option<bool> {
        let raw = self.text(column).trim();
        if raw.eq_ignore_ascii_case("true") || raw == "1" {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
            Some(false)
        } else {
            None
        }
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        parse_date(self.text(column))
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Cell text for an optional value; absent values are stored as empty cells.
pub(crate) fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Stored form of a boolean flag.
pub(crate) fn bool_cell(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}
