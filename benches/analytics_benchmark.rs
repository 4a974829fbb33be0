use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use fitlog_tracker::models::{BodyMetric, DietEntry, WorkoutEntry};
use fitlog_tracker::services::{analytics, charts};
use fitlog_tracker::time_utils::{week_label, weekday_name};
use std::hint::black_box;

/// Two years of daily records with a slow weight loss.
fn generate(days: u64) -> (Vec<BodyMetric>, Vec<WorkoutEntry>, Vec<DietEntry>) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    let mut body = Vec::new();
    let mut workouts = Vec::new();
    let mut diet = Vec::new();

    for i in 0..days {
        let date = start + Days::new(i);
        let week = week_label(date);
        let day = weekday_name(date).to_string();

        if i % 7 == 0 {
            let mut metric = BodyMetric::new(date, 90.0 - i as f64 * 0.02, 25.0 - i as f64 * 0.005);
            metric.week = week.clone();
            metric.waist = Some(95.0 - i as f64 * 0.01);
            body.push(metric);
        }

        let completed = i % 5 != 0;
        workouts.push(WorkoutEntry {
            date,
            week: week.clone(),
            day: day.clone(),
            workout_type: "Strength".to_string(),
            completed,
            exercises_completed: if completed { 6 } else { 0 },
            total_exercises: 6,
            duration_minutes: Some(60),
            intensity_rating: Some(4),
            notes: String::new(),
        });

        diet.push(DietEntry {
            date,
            week,
            day,
            adherence_score: (i % 5 + 1) as u8,
            calories_estimated: Some(2000 + (i % 300) as u32),
            meals_followed: 5,
            total_planned_meals: 6,
            notes: String::new(),
        });
    }

    (body, workouts, diet)
}

fn benchmark_analytics(c: &mut Criterion) {
    let (body, workouts, diet) = generate(730);

    let mut group = c.benchmark_group("analytics");

    group.bench_function("progress_report", |b| {
        b.iter(|| analytics::progress_report(black_box(&body), black_box(&workouts), black_box(&diet)))
    });

    group.bench_function("weekly_compliance_series", |b| {
        b.iter(|| analytics::weekly_compliance_series(black_box(&workouts), black_box(&diet)))
    });

    group.bench_function("completion_heatmap", |b| {
        b.iter(|| charts::completion_heatmap(black_box(&workouts)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_analytics);
criterion_main!(benches);
