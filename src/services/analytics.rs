// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregation over stored records.
//!
//! Everything here is a pure function of its inputs. Statistics that need
//! data which is not present come back as `None` rather than zero.

use crate::models::body::BodyField;
use crate::models::diet::MAX_ADHERENCE_SCORE;
use crate::models::plan::DAILY_TARGETS;
use crate::models::{
    BodyMetric, DietEntry, GoalProgress, ProgressReport, ProgressStats, Trend, TrendDirection,
    WeeklyCompliance, WeeklySummary, WorkoutEntry,
};
use std::collections::BTreeSet;

/// Reference line drawn on compliance charts (%).
pub const COMPLIANCE_TARGET_PCT: f64 = 80.0;

/// Weight goal: lose 10% of the starting weight.
pub const WEIGHT_LOSS_GOAL_FRACTION: f64 = 0.10;

/// Fat goal: drop body fat by 10% of its starting value.
pub const FAT_LOSS_GOAL_FRACTION: f64 = 0.10;

/// Entries used for the "recent" weight and fat trends.
pub const RECENT_TREND_WINDOW: usize = 4;

/// Slopes smaller than this in magnitude count as flat.
const FLAT_SLOPE_EPSILON: f64 = 1e-9;

/// Percentage of workout entries marked completed, `None` when empty.
pub fn workout_compliance<'a, I>(workouts: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a WorkoutEntry>,
{
    let (completed, total) = workouts
        .into_iter()
        .fold((0usize, 0usize), |(c, t), w| (c + usize::from(w.completed), t + 1));

    (total > 0).then(|| completed as f64 / total as f64 * 100.0)
}

/// Mean adherence score as a percentage of the maximum, `None` when empty.
pub fn diet_compliance<'a, I>(diet: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a DietEntry>,
{
    mean_adherence(diet).map(|mean| mean / f64::from(MAX_ADHERENCE_SCORE) * 100.0)
}

fn mean_adherence<'a, I>(diet: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a DietEntry>,
{
    let (sum, count) = diet
        .into_iter()
        .fold((0u64, 0usize), |(s, n), d| (s + u64::from(d.adherence_score), n + 1));

    (count > 0).then(|| sum as f64 / count as f64)
}

/// Records of one week with their compliance (0 for empty collections).
pub fn weekly_summary(
    week: &str,
    body: &[BodyMetric],
    workouts: &[WorkoutEntry],
    diet: &[DietEntry],
) -> WeeklySummary {
    let body_metrics: Vec<BodyMetric> = body.iter().filter(|b| b.week == week).cloned().collect();
    let workouts: Vec<WorkoutEntry> = workouts.iter().filter(|w| w.week == week).cloned().collect();
    let diet: Vec<DietEntry> = diet.iter().filter(|d| d.week == week).cloned().collect();

    WeeklySummary {
        week: week.to_string(),
        workout_compliance: workout_compliance(&workouts).unwrap_or(0.0),
        diet_compliance: diet_compliance(&diet).unwrap_or(0.0),
        body_metrics,
        workouts,
        diet,
    }
}

/// Body metrics in chronological order. The sort is stable, so entries on
/// the same date keep their stored order.
pub fn chronological(body: &[BodyMetric]) -> Vec<&BodyMetric> {
    let mut sorted: Vec<&BodyMetric> = body.iter().collect();
    sorted.sort_by_key(|b| b.date);
    sorted
}

/// Overall progress across every record.
pub fn progress_stats(
    body: &[BodyMetric],
    workouts: &[WorkoutEntry],
    diet: &[DietEntry],
) -> ProgressStats {
    let mut stats = ProgressStats::default();

    let sorted = chronological(body);
    if let (Some(first), Some(last)) = (sorted.first(), sorted.last()) {
        stats.total_entries = Some(sorted.len());
        stats.tracking_start_date = Some(first.date);
        stats.last_entry_date = Some(last.date);

        if sorted.len() >= 2 {
            let entries = sorted.len() as f64;
            let weight_change = last.weight - first.weight;
            let fat_change = last.fat_percentage - first.fat_percentage;

            stats.total_weight_change = Some(weight_change);
            stats.total_fat_change = Some(fat_change);
            stats.avg_weekly_weight_change = Some(weight_change / entries);
            stats.avg_weekly_fat_change = Some(fat_change / entries);
        }
    }

    if !workouts.is_empty() {
        stats.total_workouts_completed = Some(workouts.iter().filter(|w| w.completed).count());
        stats.total_workouts_planned = Some(workouts.len());
        stats.overall_workout_compliance = workout_compliance(workouts);
    }

    if !diet.is_empty() {
        stats.avg_diet_adherence = mean_adherence(diet);
        stats.overall_diet_compliance = diet_compliance(diet);
    }

    stats
}

/// Compliance for every week present in either collection, oldest first.
pub fn weekly_compliance_series(
    workouts: &[WorkoutEntry],
    diet: &[DietEntry],
) -> Vec<WeeklyCompliance> {
    let weeks: BTreeSet<&str> = workouts
        .iter()
        .map(|w| w.week.as_str())
        .chain(diet.iter().map(|d| d.week.as_str()))
        .collect();

    weeks
        .into_iter()
        .map(|week| WeeklyCompliance {
            week: week.to_string(),
            workout_compliance: workout_compliance(workouts.iter().filter(|w| w.week == week))
                .unwrap_or(0.0),
            diet_compliance: diet_compliance(diet.iter().filter(|d| d.week == week))
                .unwrap_or(0.0),
        })
        .collect()
}

/// Least-squares trend over the last `window` values (all when `window` is 0).
///
/// Returns `None` for fewer than two points.
pub fn trend(values: &[f64], window: usize) -> Option<Trend> {
    let values = if window > 0 && values.len() > window {
        &values[values.len() - window..]
    } else {
        values
    };
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let mean_y = values.iter().sum::<f64>() / n as f64;
    let (sxy, sxx) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (i, y)| {
            let dx = i as f64 - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });
    let slope = sxy / sxx;

    let direction = if slope > FLAT_SLOPE_EPSILON {
        TrendDirection::Increasing
    } else if slope < -FLAT_SLOPE_EPSILON {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Flat
    };

    Some(Trend {
        slope,
        intercept: mean_y - slope * mean_x,
        direction,
        points: n,
        mean_pct_change: mean_pct_change(values),
    })
}

/// Mean of consecutive relative changes, skipping steps from zero.
fn mean_pct_change(values: &[f64]) -> Option<f64> {
    let changes: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect();

    (!changes.is_empty()).then(|| changes.iter().sum::<f64>() / changes.len() as f64)
}

/// Chronological values of one body field, skipping entries without it.
pub fn field_values(body: &[BodyMetric], field: BodyField) -> Vec<f64> {
    chronological(body)
        .into_iter()
        .filter_map(|b| b.value(field))
        .collect()
}

/// Trend of one body field over its most recent entries.
pub fn body_trend(body: &[BodyMetric], field: BodyField, window: usize) -> Option<Trend> {
    trend(&field_values(body, field), window)
}

/// Progress toward reducing `start` by `target_fraction` of itself.
pub fn goal_progress(start: f64, current: f64, target_fraction: f64) -> GoalProgress {
    let amount_changed = start - current;
    let target = start * target_fraction;
    let progress_pct = if target == 0.0 {
        0.0
    } else {
        amount_changed / target * 100.0
    };

    GoalProgress {
        start,
        current,
        amount_changed,
        target,
        progress_pct,
    }
}

/// Goal progress of a body field from its first to its latest value.
pub fn body_goal(body: &[BodyMetric], field: BodyField, target_fraction: f64) -> Option<GoalProgress> {
    let values = field_values(body, field);
    match values.as_slice() {
        [first, .., last] => Some(goal_progress(*first, *last, target_fraction)),
        _ => None,
    }
}

/// How close mean estimated calories are to `target` (%), `None` without data.
pub fn calorie_adherence(diet: &[DietEntry], target: f64) -> Option<f64> {
    let calories: Vec<f64> = diet
        .iter()
        .filter_map(|d| d.calories_estimated)
        .map(f64::from)
        .collect();
    if calories.is_empty() || target <= 0.0 {
        return None;
    }

    let avg = calories.iter().sum::<f64>() / calories.len() as f64;
    Some((1.0 - (avg - target).abs() / target) * 100.0)
}

/// Stats, goals and recent trends for the dashboard.
pub fn progress_report(
    body: &[BodyMetric],
    workouts: &[WorkoutEntry],
    diet: &[DietEntry],
) -> ProgressReport {
    ProgressReport {
        stats: progress_stats(body, workouts, diet),
        weight_goal: body_goal(body, BodyField::Weight, WEIGHT_LOSS_GOAL_FRACTION),
        fat_goal: body_goal(body, BodyField::FatPercentage, FAT_LOSS_GOAL_FRACTION),
        recent_weight_trend: body_trend(body, BodyField::Weight, RECENT_TREND_WINDOW),
        recent_fat_trend: body_trend(body, BodyField::FatPercentage, RECENT_TREND_WINDOW),
        calorie_adherence: calorie_adherence(diet, DAILY_TARGETS.calories.midpoint()),
        compliance_target: COMPLIANCE_TARGET_PCT,
    }
}

/// Latest `limit` body metrics, newest first.
pub fn recent_body_metrics(body: &[BodyMetric], limit: usize) -> Vec<BodyMetric> {
    chronological(body)
        .into_iter()
        .rev()
        .take(limit)
        .cloned()
        .collect()
}

/// Latest `limit` completed workouts, newest first.
pub fn recent_completed_workouts(workouts: &[WorkoutEntry], limit: usize) -> Vec<WorkoutEntry> {
    let mut completed: Vec<&WorkoutEntry> = workouts.iter().filter(|w| w.completed).collect();
    completed.sort_by_key(|w| w.date);
    completed.into_iter().rev().take(limit).cloned().collect()
}
