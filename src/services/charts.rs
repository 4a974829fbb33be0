// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plot-ready series built from stored records.

use crate::models::body::BodyField;
use crate::models::{BodyMetric, DietEntry, Trend, WeeklyCompliance, WorkoutEntry};
use crate::services::analytics::{self, COMPLIANCE_TARGET_PCT};
use crate::time_utils::{week_start, WEEKDAY_NAMES};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One named line of a time plot.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: BodyField,
    pub unit: &'static str,
    pub points: Vec<TimePoint>,
}

/// A field's values with the fitted trend line over the same dates.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    #[serde(flatten)]
    pub series: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Empty when there are fewer than two points.
    pub trend_line: Vec<TimePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceChart {
    pub series: Vec<WeeklyCompliance>,
    pub target: f64,
}

/// Week-by-weekday completion table.
///
/// Rows are week-start (Monday) dates, oldest first. Columns are the
/// weekday names that occur in the data, Monday first. A cell is 1 when a
/// workout on that day of that week was completed, otherwise 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub week_starts: Vec<NaiveDate>,
    pub days: Vec<&'static str>,
    pub cells: Vec<Vec<u8>>,
}

fn series(body: &[BodyMetric], field: BodyField) -> Series {
    let points = analytics::chronological(body)
        .into_iter()
        .filter_map(|b| {
            b.value(field).map(|value| TimePoint {
                date: b.date,
                value,
            })
        })
        .collect();

    Series {
        name: field,
        unit: field.unit(),
        points,
    }
}

/// Time series of one body field with a linear trend overlay.
///
/// `None` when no entry records the field.
pub fn body_series_with_trend(body: &[BodyMetric], field: BodyField) -> Option<TrendSeries> {
    let series = series(body, field);
    if series.points.is_empty() {
        return None;
    }

    let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
    let trend = analytics::trend(&values, 0);
    let trend_line = trend
        .as_ref()
        .map(|t| {
            series
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| TimePoint {
                    date: p.date,
                    value: t.value_at(i),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(TrendSeries {
        series,
        trend,
        trend_line,
    })
}

/// One series per circumference measurement that has at least one value.
pub fn measurement_series(body: &[BodyMetric]) -> Vec<Series> {
    BodyField::MEASUREMENTS
        .into_iter()
        .map(|field| series(body, field))
        .filter(|s| !s.points.is_empty())
        .collect()
}

/// Weight change from each entry to the next, dated at the later entry.
pub fn weight_change_series(body: &[BodyMetric]) -> Vec<TimePoint> {
    analytics::chronological(body)
        .windows(2)
        .map(|pair| TimePoint {
            date: pair[1].date,
            value: pair[1].weight - pair[0].weight,
        })
        .collect()
}

pub fn compliance_chart(workouts: &[WorkoutEntry], diet: &[DietEntry]) -> ComplianceChart {
    ComplianceChart {
        series: analytics::weekly_compliance_series(workouts, diet),
        target: COMPLIANCE_TARGET_PCT,
    }
}

/// Pivot workouts into a completion heatmap. `None` without workouts.
///
/// Rows are Monday week starts and columns the weekday of each entry's date,
/// so a cell always belongs to the week it is drawn in. The `day` label is
/// not consulted.
pub fn completion_heatmap(workouts: &[WorkoutEntry]) -> Option<Heatmap> {
    if workouts.is_empty() {
        return None;
    }

    let mut weeks: BTreeMap<NaiveDate, [Option<u8>; 7]> = BTreeMap::new();
    let mut seen = [false; 7];

    for w in workouts {
        let col = w.date.weekday().num_days_from_monday() as usize;
        seen[col] = true;

        let cell = &mut weeks.entry(week_start(w.date)).or_default()[col];
        *cell = Some(cell.unwrap_or(0).max(u8::from(w.completed)));
    }

    let columns: Vec<usize> = (0..7).filter(|&c| seen[c]).collect();

    Some(Heatmap {
        days: columns.iter().map(|&c| WEEKDAY_NAMES[c]).collect(),
        cells: weeks
            .values()
            .map(|row| columns.iter().map(|&c| row[c].unwrap_or(0)).collect())
            .collect(),
        week_starts: weeks.into_keys().collect(),
    })
}
