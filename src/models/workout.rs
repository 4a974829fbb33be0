// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout completion record, keyed by (date, day).

use super::{bool_cell, opt_cell, RecordKind, RowReader, TabularRecord, WeeklyPlan};
use crate::error::StoreError;
use crate::time_utils::{parse_weekday, week_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion log for one planned workout day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub week: String,
    /// Plan day name ("Monday".."Sunday")
    pub day: String,
    /// Empty means "use the plan's workout type for `day`".
    #[serde(default)]
    pub workout_type: String,
    pub completed: bool,
    pub exercises_completed: u32,
    /// Zero means "use the plan's exercise count for `day`".
    #[serde(default)]
    pub total_exercises: u32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Perceived intensity, 1-5
    #[serde(default)]
    pub intensity_rating: Option<u8>,
    #[serde(default)]
    pub notes: String,
}

impl WorkoutEntry {
    /// Fraction of exercises done, `None` when nothing was planned.
    pub fn exercise_ratio(&self) -> Option<f64> {
        (self.total_exercises > 0)
            .then(|| f64::from(self.exercises_completed) / f64::from(self.total_exercises))
    }
}

impl TabularRecord for WorkoutEntry {
    const KIND: RecordKind = RecordKind::Workout;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn day(&self) -> Option<&str> {
        Some(&self.day)
    }

    fn week(&self) -> &str {
        &self.week
    }

    fn refresh_week(&mut self) {
        self.week = week_label(self.date);
    }

    fn apply_plan_defaults(&mut self, plan: &WeeklyPlan) {
        if self.total_exercises == 0 {
            self.total_exercises = plan.planned_exercise_count(&self.day);
        }
        if self.workout_type.trim().is_empty() {
            if let Some(day) = plan.day(&self.day) {
                self.workout_type = day.workout_type.to_string();
            }
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        if parse_weekday(&self.day).is_none() {
            return Err(StoreError::InvalidRecord(format!(
                "day must be a weekday name, got {:?}",
                self.day
            )));
        }
        if self.exercises_completed > self.total_exercises {
            return Err(StoreError::InvalidRecord(format!(
                "exercises_completed ({}) exceeds total_exercises ({})",
                self.exercises_completed, self.total_exercises
            )));
        }
        if let Some(rating) = self.intensity_rating {
            if !(1..=5).contains(&rating) {
                return Err(StoreError::InvalidRecord(format!(
                    "intensity_rating must be within 1-5, got {}",
                    rating
                )));
            }
        }
        Ok(())
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.week.clone(),
            self.day.clone(),
            self.workout_type.clone(),
            bool_cell(self.completed),
            self.exercises_completed.to_string(),
            self.total_exercises.to_string(),
            opt_cell(self.duration_minutes),
            opt_cell(self.intensity_rating),
            self.notes.clone(),
        ]
    }

    fn from_row(row: &RowReader<'_>) -> Option<Self> {
        let date = row.date("date")?;
        let day = row.text("day").trim();
        if day.is_empty() {
            return None;
        }
        let week = match row.text("week").trim() {
            "" => week_label(date),
            w => w.to_string(),
        };

        Some(Self {
            date,
            week,
            day: day.to_string(),
            workout_type: row.text("workout_type").to_string(),
            completed: row.bool("completed").unwrap_or(false),
            exercises_completed: row.u32("exercises_completed").unwrap_or(0),
            total_exercises: row.u32("total_exercises").unwrap_or(0),
            duration_minutes: row.u32("duration_minutes"),
            intensity_rating: row.u8("intensity_rating"),
            notes: row.text("notes").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> WorkoutEntry {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        WorkoutEntry {
            date,
            week: week_label(date),
            day: "Monday".to_string(),
            workout_type: "Push".to_string(),
            completed: true,
            exercises_completed: 6,
            total_exercises: 7,
            duration_minutes: Some(55),
            intensity_rating: None,
            notes: "felt strong, new PR".to_string(),
        }
    }

    #[test]
    fn test_completed_serialized_as_title_case() {
        let row = entry().to_row();
        assert_eq!(row[4], "True");
        assert_eq!(row[8], "");
    }

    #[test]
    fn test_completed_parsed_case_insensitively() {
        let mut row = entry().to_row();
        row[4] = "false".to_string();
        let decoded = WorkoutEntry::from_row(&RowReader::new(RecordKind::Workout, &row)).unwrap();
        assert!(!decoded.completed);

        row[4] = "TRUE".to_string();
        let decoded = WorkoutEntry::from_row(&RowReader::new(RecordKind::Workout, &row)).unwrap();
        assert!(decoded.completed);
        assert_eq!(decoded.intensity_rating, None);
        assert_eq!(decoded.notes, "felt strong, new PR");
    }

    #[test]
    fn test_validation_rejects_overcount() {
        let mut e = entry();
        e.exercises_completed = 8;
        assert!(e.validate().unwrap_err().is_invalid_record());

        let mut e = entry();
        e.intensity_rating = Some(6);
        assert!(e.validate().is_err());

        let mut e = entry();
        e.day = "Someday".to_string();
        assert!(e.validate().is_err());

        assert!(entry().validate().is_ok());
    }

    #[test]
    fn test_plan_defaults_fill_blanks_only() {
        let plan = WeeklyPlan::get();
        let mut e = entry();
        e.total_exercises = 0;
        e.workout_type = String::new();
        e.apply_plan_defaults(&plan);
        assert_eq!(e.total_exercises, 7);
        assert_eq!(e.workout_type, "Push (Chest, Shoulders, Triceps + Core)");

        let mut e = entry();
        e.apply_plan_defaults(&plan);
        assert_eq!(e.total_exercises, 7);
        assert_eq!(e.workout_type, "Push");
    }

    #[test]
    fn test_exercise_ratio() {
        let mut e = entry();
        assert!((e.exercise_ratio().unwrap() - 6.0 / 7.0).abs() < 1e-9);
        e.total_exercises = 0;
        e.exercises_completed = 0;
        assert_eq!(e.exercise_ratio(), None);
    }
}
