// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregation scenarios over realistic record sets.

use fitlog_tracker::models::body::BodyField;
use fitlog_tracker::models::TrendDirection;
use fitlog_tracker::services::analytics::{
    body_goal, diet_compliance, goal_progress, progress_report, progress_stats, trend,
    weekly_compliance_series, workout_compliance, RECENT_TREND_WINDOW, WEIGHT_LOSS_GOAL_FRACTION,
};
use fitlog_tracker::time_utils::week_label;

mod common;
use common::{body, date, diet, workout};

#[test]
fn test_total_change_is_last_minus_first_chronologically() {
    // Stored out of order: the later date was entered first.
    let records = vec![
        body(date(2024, 1, 22), 79.0, 19.5),
        body(date(2024, 1, 15), 80.0, 20.0),
    ];
    let stats = progress_stats(&records, &[], &[]);

    assert_eq!(stats.total_weight_change, Some(-1.0));
    assert_eq!(stats.total_fat_change, Some(-0.5));
    assert_eq!(stats.avg_weekly_weight_change, Some(-0.5));
    assert_eq!(stats.avg_weekly_fat_change, Some(-0.25));
    assert_eq!(stats.tracking_start_date, Some(date(2024, 1, 15)));
    assert_eq!(stats.last_entry_date, Some(date(2024, 1, 22)));
}

#[test]
fn test_single_entry_has_no_change() {
    let records = vec![body(date(2024, 1, 15), 80.0, 20.0)];
    let stats = progress_stats(&records, &[], &[]);

    assert_eq!(stats.total_entries, Some(1));
    assert_eq!(stats.total_weight_change, None);
    assert_eq!(stats.avg_weekly_fat_change, None);

    let json = serde_json::to_value(&stats).unwrap();
    assert!(json.get("total_weight_change").is_none());
    assert!(json.get("overall_diet_compliance").is_none());
}

#[test]
fn test_empty_collections_omit_everything() {
    let stats = progress_stats(&[], &[], &[]);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn test_overall_compliance() {
    let workouts: Vec<_> = (15..22)
        .map(|d| workout(date(2024, 1, d), d != 16 && d != 19))
        .collect();
    let diets = vec![
        diet(date(2024, 1, 15), 4),
        diet(date(2024, 1, 16), 5),
        diet(date(2024, 1, 17), 3),
    ];
    let stats = progress_stats(&[], &workouts, &diets);

    assert_eq!(stats.total_workouts_completed, Some(5));
    assert_eq!(stats.total_workouts_planned, Some(7));
    assert_eq!(stats.overall_workout_compliance.map(f64::round), Some(71.0));
    assert_eq!(stats.avg_diet_adherence, Some(4.0));
    assert_eq!(stats.overall_diet_compliance, Some(80.0));

    assert_eq!(workout_compliance(&workouts).map(f64::round), Some(71.0));
    assert_eq!(diet_compliance(&diets), Some(80.0));
}

#[test]
fn test_weekly_series_covers_weeks_from_either_collection() {
    let mut workouts = vec![
        workout(date(2024, 1, 16), true),
        workout(date(2024, 1, 17), false),
    ];
    for w in &mut workouts {
        w.week = week_label(w.date);
    }
    let mut diets = vec![diet(date(2024, 1, 23), 5)];
    diets[0].week = week_label(diets[0].date);

    let series = weekly_compliance_series(&workouts, &diets);
    assert_eq!(series.len(), 2);

    assert_eq!(series[0].week, "2024-W02");
    assert_eq!(series[0].workout_compliance, 50.0);
    assert_eq!(series[0].diet_compliance, 0.0);

    assert_eq!(series[1].week, "2024-W03");
    assert_eq!(series[1].workout_compliance, 0.0);
    assert_eq!(series[1].diet_compliance, 100.0);
}

#[test]
fn test_trend_direction_and_rate() {
    let rising = trend(&[70.0, 70.5, 71.0, 71.5], RECENT_TREND_WINDOW).unwrap();
    assert_eq!(rising.direction, TrendDirection::Increasing);
    assert!((rising.slope - 0.5).abs() < 1e-9);
    assert!(rising.mean_pct_change.unwrap() > 0.0);

    assert!(trend(&[70.0], RECENT_TREND_WINDOW).is_none());
}

#[test]
fn test_goal_progress_for_weight_and_fat() {
    let records = vec![
        body(date(2024, 1, 1), 90.0, 25.0),
        body(date(2024, 1, 8), 88.0, 24.0),
        body(date(2024, 1, 15), 85.5, 23.0),
    ];

    let weight = body_goal(&records, BodyField::Weight, WEIGHT_LOSS_GOAL_FRACTION).unwrap();
    assert_eq!(weight.start, 90.0);
    assert_eq!(weight.current, 85.5);
    assert!((weight.target - 9.0).abs() < 1e-9);
    assert!((weight.progress_pct - 50.0).abs() < 1e-9);
    assert!((weight.bar_fraction() - 0.5).abs() < 1e-9);

    let fat = body_goal(&records, BodyField::FatPercentage, 0.1).unwrap();
    assert_eq!(fat.amount_changed, 2.0);

    assert!(body_goal(&records[..1], BodyField::Weight, 0.1).is_none());

    // Gaining weight shows negative progress, clamped for the bar.
    let gained = goal_progress(80.0, 82.0, 0.1);
    assert!(gained.progress_pct < 0.0);
    assert_eq!(gained.bar_fraction(), 0.0);
}

#[test]
fn test_progress_report_combines_goals_and_calories() {
    let records = vec![
        body(date(2024, 1, 1), 90.0, 25.0),
        body(date(2024, 1, 8), 89.0, 24.5),
    ];
    let diets = vec![diet(date(2024, 1, 1), 5), diet(date(2024, 1, 2), 4)];
    let report = progress_report(&records, &[], &diets);

    assert_eq!(report.stats.total_weight_change, Some(-1.0));
    assert!(report.weight_goal.is_some());
    assert_eq!(report.calorie_adherence, Some(100.0));
    assert_eq!(
        report.recent_fat_trend.map(|t| t.direction),
        Some(TrendDirection::Decreasing)
    );
}
