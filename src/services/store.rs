// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record store: typed save/load over whichever backend was selected.
//!
//! Writes return the backend error so callers can report it and retry.
//! Reads never fail: an unreachable backend yields empty collections after
//! the failure has been logged.

use crate::db::table::encode_csv;
use crate::db::{RecordBackend, StorageInfo, UpsertOutcome};
use crate::error::StoreError;
use crate::models::{
    BodyMetric, DietEntry, RecordKind, RowReader, TabularRecord, WeeklyPlan, WeeklySummary,
    WorkoutEntry,
};
use crate::services::analytics;
use std::sync::Arc;

/// Every stored record, loaded together for aggregation.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub body: Vec<BodyMetric>,
    pub workouts: Vec<WorkoutEntry>,
    pub diet: Vec<DietEntry>,
}

#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn RecordBackend>,
    plan: WeeklyPlan,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn RecordBackend>) -> Self {
        Self {
            backend,
            plan: WeeklyPlan::get(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Insert or replace the record sharing `record`'s natural key.
    ///
    /// The week label is recomputed from the date and the record is
    /// validated before anything is written.
    pub async fn save<R: TabularRecord>(&self, mut record: R) -> Result<UpsertOutcome, StoreError> {
        record.refresh_week();
        record.apply_plan_defaults(&self.plan);
        record.validate()?;

        let key = record.key();
        match self.backend.upsert_row(R::KIND, record.to_row()).await {
            Ok(outcome) => {
                tracing::info!(
                    kind = %R::KIND,
                    date = %key.date,
                    day = key.day.as_deref().unwrap_or(""),
                    outcome = ?outcome,
                    "Saved record"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(
                    kind = %R::KIND,
                    date = %key.date,
                    backend = self.backend.name(),
                    error = %e,
                    "Failed to save record"
                );
                Err(e)
            }
        }
    }

    /// All records of a kind in stored order; empty when unavailable.
    pub async fn load<R: TabularRecord>(&self) -> Vec<R> {
        let rows = match self.backend.load_rows(R::KIND).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(
                    kind = %R::KIND,
                    backend = self.backend.name(),
                    error = %e,
                    "Failed to load records"
                );
                return Vec::new();
            }
        };

        let total = rows.len();
        let records: Vec<R> = rows
            .iter()
            .filter_map(|row| R::from_row(&RowReader::new(R::KIND, row)))
            .collect();

        if records.len() < total {
            tracing::warn!(
                kind = %R::KIND,
                skipped = total - records.len(),
                "Skipped unreadable rows"
            );
        }
        records
    }

    /// Load all three collections concurrently.
    pub async fn load_all(&self) -> Records {
        let (body, workouts, diet) = tokio::join!(
            self.load::<BodyMetric>(),
            self.load::<WorkoutEntry>(),
            self.load::<DietEntry>()
        );
        Records {
            body,
            workouts,
            diet,
        }
    }

    /// Drop every record of every kind.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.backend.reset().await.inspect_err(|e| {
            tracing::error!(backend = self.backend.name(), error = %e, "Failed to reset data");
        })?;
        tracing::info!(backend = self.backend.name(), "All data reset");
        Ok(())
    }

    pub async fn weekly_summary(&self, week: &str) -> WeeklySummary {
        let records = self.load_all().await;
        analytics::weekly_summary(week, &records.body, &records.workouts, &records.diet)
    }

    pub async fn describe(&self) -> Result<StorageInfo, StoreError> {
        self.backend.describe().await
    }

    /// Body metrics as CSV text with the canonical header.
    ///
    /// Rows are exported as stored, including ones the typed load skips.
    pub async fn export_body_metrics_csv(&self) -> Result<String, StoreError> {
        let rows = self.backend.load_rows(RecordKind::BodyMetrics).await?;
        let bytes = encode_csv(RecordKind::BodyMetrics, &rows)?;
        String::from_utf8(bytes)
            .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
