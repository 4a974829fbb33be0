// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Diet adherence record, keyed by (date, day).

use super::{opt_cell, RecordKind, RowReader, TabularRecord};
use crate::error::StoreError;
use crate::time_utils::{parse_weekday, week_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Meal slots in the weekly plan.
pub const DEFAULT_PLANNED_MEALS: u32 = 6;

/// Highest adherence score; compliance is the mean score over this.
pub const MAX_ADHERENCE_SCORE: u8 = 5;

fn default_planned_meals() -> u32 {
    DEFAULT_PLANNED_MEALS
}

/// Diet adherence for one plan day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub week: String,
    pub day: String,
    /// Self-rated adherence, 1-5
    pub adherence_score: u8,
    #[serde(default)]
    pub calories_estimated: Option<u32>,
    #[serde(default)]
    pub meals_followed: u32,
    #[serde(default = "default_planned_meals")]
    pub total_planned_meals: u32,
    #[serde(default)]
    pub notes: String,
}

impl TabularRecord for DietEntry {
    const KIND: RecordKind = RecordKind::Diet;

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

    fn validate(&self) -> Result<(), StoreError> {
        if parse_weekday(&self.day).is_none() {
            return Err(StoreError::InvalidRecord(format!(
                "day must be a weekday name, got {:?}",
                self.day
            )));
        }
        if !(1..=MAX_ADHERENCE_SCORE).contains(&self.adherence_score) {
            return Err(StoreError::InvalidRecord(format!(
                "adherence_score must be within 1-{}, got {}",
                MAX_ADHERENCE_SCORE, self.adherence_score
            )));
        }
        if self.meals_followed > self.total_planned_meals {
            return Err(StoreError::InvalidRecord(format!(
                "meals_followed ({}) exceeds total_planned_meals ({})",
                self.meals_followed, self.total_planned_meals
            )));
        }
        Ok(())
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.week.clone(),
            self.day.clone(),
            self.adherence_score.to_string(),
            opt_cell(self.calories_estimated),
            self.meals_followed.to_string(),
            self.total_planned_meals.to_string(),
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
            // Compliance is meaningless without a score.
            adherence_score: row.u8("adherence_score")?,
            calories_estimated: row.u32("calories_estimated"),
            meals_followed: row.u32("meals_followed").unwrap_or(0),
            total_planned_meals: row
                .u32("total_planned_meals")
                .unwrap_or(DEFAULT_PLANNED_MEALS),
            notes: row.text("notes").to_string(),
        })
    }
}
