//! Derived statistics returned by the analytics service.
//!
//! Every statistic that needs data which may not exist yet is an `Option`
//! and is skipped when serialized, so "no data" is never reported as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BodyMetric, DietEntry, WorkoutEntry};

/// Overall progress across every stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    // ─── Body Metrics ────────────────────────────────────────────
    /// Last weight minus first weight (kg); needs two entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_weight_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fat_change: Option<f64>,
    /// Weight change divided by number of entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_weekly_weight_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_weekly_fat_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_entries: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_entry_date: Option<NaiveDate>,

    // ─── Workouts ────────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_workouts_completed: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_workouts_planned: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_workout_compliance: Option<f64>,

    // ─── Diet ────────────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_diet_adherence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_diet_compliance: Option<f64>,
}

/// Compliance for one week bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCompliance {
    pub week: String,
    pub workout_compliance: f64,
    pub diet_compliance: f64,
}

/// Records and compliance for one week.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    pub week: String,
    pub body_metrics: Vec<BodyMetric>,
    pub workouts: Vec<WorkoutEntry>,
    pub diet: Vec<DietEntry>,
    /// 0 when the week has no workout entries
    pub workout_compliance: f64,
    /// 0 when the week has no diet entries
    pub diet_compliance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Flat,
}

/// Least-squares line of value against sequence index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Change per entry
    pub slope: f64,
    pub intercept: f64,
    pub direction: TrendDirection,
    /// Number of points fitted
    pub points: usize,
    /// Mean relative change between consecutive points (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_pct_change: Option<f64>,
}

impl Trend {
    /// Fitted value at sequence index `i`.
    pub fn value_at(&self, i: usize) -> f64 {
        self.intercept + self.slope * i as f64
    }
}

/// Progress toward a reduction goal expressed as a fraction of the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub start: f64,
    pub current: f64,
    /// start - current (positive means reduced)
    pub amount_changed: f64,
    /// start * target fraction
    pub target: f64,
    /// 0 when the target is 0
    pub progress_pct: f64,
}

impl GoalProgress {
    /// Progress clamped to `0.0..=1.0` for progress bars.
    pub fn bar_fraction(&self) -> f64 {
        (self.progress_pct / 100.0).clamp(0.0, 1.0)
    }
}

/// Dashboard view: overall stats plus goals and recent trends.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    #[serde(flatten)]
    pub stats: ProgressStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_goal: Option<GoalProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_goal: Option<GoalProgress>,
    /// Fitted over the most recent entries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_weight_trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_fat_trend: Option<Trend>,
    /// Closeness of average estimated calories to the daily target (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_adherence: Option<f64>,
    pub compliance_target: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_stats_are_not_serialized() {
        let stats = ProgressStats {
            total_entries: Some(1),
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("total_weight_change"));
        assert!(!obj.contains_key("overall_workout_compliance"));
        assert_eq!(obj.get("total_entries"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_bar_fraction_clamps() {
        let mut goal = GoalProgress {
            start: 80.0,
            current: 70.0,
            amount_changed: 10.0,
            target: 8.0,
            progress_pct: 125.0,
        };
        assert_eq!(goal.bar_fraction(), 1.0);
        goal.progress_pct = -20.0;
        assert_eq!(goal.bar_fraction(), 0.0);
        goal.progress_pct = 50.0;
        assert_eq!(goal.bar_fraction(), 0.5);
    }

    #[test]
    fn test_trend_value_at() {
        let trend = Trend {
            slope: -0.5,
            intercept: 80.0,
            direction: TrendDirection::Decreasing,
            points: 3,
            mean_pct_change: None,
        };
        assert_eq!(trend.value_at(0), 80.0);
        assert_eq!(trend.value_at(2), 79.0);
    }
}
