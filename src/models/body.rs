// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Body measurement record, keyed by calendar date.

use super::{opt_cell, RecordKind, RowReader, TabularRecord};
use crate::error::StoreError;
use crate::time_utils::week_label;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's body measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMetric {
    pub date: NaiveDate,
    /// Derived from `date`; recomputed on save.
    #[serde(default)]
    pub week: String,
    /// Body weight (kg)
    pub weight: f64,
    /// Body fat (%)
    pub fat_percentage: f64,
    /// Muscle mass (kg)
    #[serde(default)]
    pub muscle_mass: Option<f64>,
    // Circumferences (cm)
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub hips: Option<f64>,
    #[serde(default)]
    pub arms: Option<f64>,
    #[serde(default)]
    pub thighs: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

/// Numeric body-metric fields that can be charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyField {
    Weight,
    FatPercentage,
    MuscleMass,
    Chest,
    Waist,
    Hips,
    Arms,
    Thighs,
}

impl BodyField {
    /// Circumference measurements, in display order.
    pub const MEASUREMENTS: [BodyField; 5] = [
        BodyField::Chest,
        BodyField::Waist,
        BodyField::Hips,
        BodyField::Arms,
        BodyField::Thighs,
    ];

    pub fn column(self) -> &'static str {
        match self {
            BodyField::Weight => "weight",
            BodyField::FatPercentage => "fat_percentage",
            BodyField::MuscleMass => "muscle_mass",
            BodyField::Chest => "chest",
            BodyField::Waist => "waist",
            BodyField::Hips => "hips",
            BodyField::Arms => "arms",
            BodyField::Thighs => "thighs",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            BodyField::Weight | BodyField::MuscleMass => "kg",
            BodyField::FatPercentage => "%",
            _ => "cm",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        [
            BodyField::Weight,
            BodyField::FatPercentage,
            BodyField::MuscleMass,
        ]
        .into_iter()
        .chain(Self::MEASUREMENTS)
        .find(|f| f.column() == column)
    }
}

impl BodyMetric {
    /// Minimal entry with only the required fields set.
    pub fn new(date: NaiveDate, weight: f64, fat_percentage: f64) -> Self {
        Self {
            date,
            week: week_label(date),
            weight,
            fat_percentage,
            muscle_mass: None,
            chest: None,
            waist: None,
            hips: None,
            arms: None,
            thighs: None,
            notes: String::new(),
        }
    }

    /// Value of a numeric field, `None` when not recorded.
    pub fn value(&self, field: BodyField) -> Option<f64> {
        match field {
            BodyField::Weight => Some(self.weight),
            BodyField::FatPercentage => Some(self.fat_percentage),
            BodyField::MuscleMass => self.muscle_mass,
            BodyField::Chest => self.chest,
            BodyField::Waist => self.waist,
            BodyField::Hips => self.hips,
            BodyField::Arms => self.arms,
            BodyField::Thighs => self.thighs,
        }
    }
}

impl TabularRecord for BodyMetric {
    const KIND: RecordKind = RecordKind::BodyMetrics;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn week(&self) -> &str {
        &self.week
    }

    fn refresh_week(&mut self) {
        self.week = week_label(self.date);
    }

    fn validate(&self) -> Result<(), StoreError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(StoreError::InvalidRecord(format!(
                "weight must be positive, got {}",
                self.weight
            )));
        }
        if !(0.0..=100.0).contains(&self.fat_percentage) {
            return Err(StoreError::InvalidRecord(format!(
                "fat_percentage must be within 0-100, got {}",
                self.fat_percentage
            )));
        }
        for field in std::iter::once(BodyField::MuscleMass).chain(BodyField::MEASUREMENTS) {
            if let Some(v) = self.value(field) {
                if !v.is_finite() || v <= 0.0 {
                    return Err(StoreError::InvalidRecord(format!(
                        "{} must be positive when set, got {}",
                        field.column(),
                        v
                    )));
                }
            }
        }
        Ok(())
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.week.clone(),
            self.weight.to_string(),
            self.fat_percentage.to_string(),
            opt_cell(self.muscle_mass),
            opt_cell(self.chest),
            opt_cell(self.waist),
            opt_cell(self.hips),
            opt_cell(self.arms),
            opt_cell(self.thighs),
            self.notes.clone(),
        ]
    }

    fn from_row(row: &RowReader<'_>) -> Option<Self> {
        let date = row.date("date")?;
        let week = match row.text("week").trim() {
            "" => week_label(date),
            w => w.to_string(),
        };

        Some(Self {
            date,
            week,
            weight: row.f64("weight")?,
            fat_percentage: row.f64("fat_percentage")?,
            muscle_mass: row.f64("muscle_mass"),
            chest: row.f64("chest"),
            waist: row.f64("waist"),
            hips: row.f64("hips"),
            arms: row.f64("arms"),
            thighs: row.f64("thighs"),
            notes: row.text("notes").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_optional_fields_stay_absent() {
        let mut metric = BodyMetric::new(date(), 80.5, 20.0);
        metric.waist = Some(90.0);

        let row = metric.to_row();
        assert_eq!(row.len(), RecordKind::BodyMetrics.columns().len());
        assert_eq!(row[4], "");

        let decoded = BodyMetric::from_row(&RowReader::new(RecordKind::BodyMetrics, &row)).unwrap();
        assert_eq!(decoded.muscle_mass, None);
        assert_eq!(decoded.waist, Some(90.0));
        assert_eq!(decoded, metric);
    }

    #[test]
    fn test_missing_weight_is_unusable() {
        let row: Vec<String> = vec!["2024-01-15".into(), "".into(), "".into(), "20".into()];
        assert!(BodyMetric::from_row(&RowReader::new(RecordKind::BodyMetrics, &row)).is_none());
    }

    #[test]
    fn test_validation() {
        assert!(BodyMetric::new(date(), 80.0, 20.0).validate().is_ok());
        assert!(BodyMetric::new(date(), 0.0, 20.0).validate().is_err());
        assert!(BodyMetric::new(date(), 80.0, 120.0).validate().is_err());

        let mut bad = BodyMetric::new(date(), 80.0, 20.0);
        bad.chest = Some(-3.0);
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("chest"));
    }

    #[test]
    fn test_body_field_lookup() {
        assert_eq!(BodyField::from_column("fat_percentage"), Some(BodyField::FatPercentage));
        assert_eq!(BodyField::from_column("thighs"), Some(BodyField::Thighs));
        assert_eq!(BodyField::from_column("notes"), None);
    }
}
