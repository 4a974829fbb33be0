// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use chrono::NaiveDate;
use fitlog_tracker::config::Config;
use fitlog_tracker::db::{FlatFileBackend, RecordBackend, Rows, StorageInfo, UpsertOutcome};
use fitlog_tracker::error::StoreError;
use fitlog_tracker::models::{BodyMetric, DietEntry, RecordKind, WorkoutEntry};
use fitlog_tracker::routes::create_router;
use fitlog_tracker::services::RecordStore;
use fitlog_tracker::AppState;
use std::sync::Arc;
use tempfile::TempDir;

/// Check if a real spreadsheet is configured for integration tests.
#[allow(dead_code)]
pub fn sheets_available() -> bool {
    std::env::var("SHEETS_TEST_SPREADSHEET_ID").is_ok()
        && std::env::var("GOOGLE_SHEETS_CREDENTIALS").is_ok()
}

/// Skip test with message if no test spreadsheet is configured.
#[macro_export]
macro_rules! require_sheets {
    () => {
        if !crate::common::sheets_available() {
            eprintln!("⚠️  Skipping: SHEETS_TEST_SPREADSHEET_ID not set");
            return;
        }
    };
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Workout entry with `day` matching its date.
#[allow(dead_code)]
pub fn workout(date: NaiveDate, completed: bool) -> WorkoutEntry {
    WorkoutEntry {
        date,
        week: String::new(),
        day: date.format("%A").to_string(),
        workout_type: "Strength".to_string(),
        completed,
        exercises_completed: if completed { 6 } else { 0 },
        total_exercises: 6,
        duration_minutes: Some(60),
        intensity_rating: Some(4),
        notes: String::new(),
    }
}

/// Diet entry with `day` matching its date.
#[allow(dead_code)]
pub fn diet(date: NaiveDate, adherence_score: u8) -> DietEntry {
    DietEntry {
        date,
        week: String::new(),
        day: date.format("%A").to_string(),
        adherence_score,
        calories_estimated: Some(2100),
        meals_followed: 5,
        total_planned_meals: 6,
        notes: String::new(),
    }
}

#[allow(dead_code)]
pub fn body(date: NaiveDate, weight: f64, fat_percentage: f64) -> BodyMetric {
    BodyMetric::new(date, weight, fat_percentage)
}

/// Record store over CSV files in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
#[allow(dead_code)]
pub fn test_store() -> (RecordStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let backend = FlatFileBackend::new(dir.path()).expect("Failed to init CSV backend");
    (RecordStore::new(Arc::new(backend)), dir)
}

/// Backend whose every operation fails, as if the remote were unreachable.
#[allow(dead_code)]
pub struct UnreachableBackend;

#[async_trait]
impl RecordBackend for UnreachableBackend {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn load_rows(&self, _kind: RecordKind) -> Result<Rows, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn upsert_row(
        &self,
        _kind: RecordKind,
        _row: Vec<String>,
    ) -> Result<UpsertOutcome, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn reset(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn describe(&self) -> Result<StorageInfo, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Create a test app over a temp-dir CSV store.
/// Returns the router, the shared state and the directory guard.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, TempDir) {
    let (store, dir) = test_store();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let state = Arc::new(AppState { config, store });
    (create_router(state.clone()), state, dir)
}

/// Create a test app whose backend always fails.
#[allow(dead_code)]
pub fn create_unreachable_app() -> axum::Router {
    let state = Arc::new(AppState {
        config: Config::default(),
        store: RecordStore::new(Arc::new(UnreachableBackend)),
    });
    create_router(state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn text_body(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
