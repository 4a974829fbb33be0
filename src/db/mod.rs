// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage backends.
//!
//! Both backends store each [`RecordKind`] as a header row plus one text row
//! per record and implement the same upsert-by-natural-key contract, so the
//! rest of the application never knows which one is active.

pub mod flat_file;
pub mod sheets;
pub mod table;

pub use flat_file::FlatFileBackend;
pub use sheets::SheetsBackend;

use crate::config::Config;
use crate::error::StoreError;
use crate::models::RecordKind;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Rows in canonical column order (see [`RecordKind::columns`]).
pub type Rows = Vec<Vec<String>>;

/// Whether an upsert replaced an existing row or added a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Per-table details for the flat-file backend.
#[derive(Debug, Clone, Serialize)]
pub struct TableFileInfo {
    pub name: String,
    pub path: String,
    pub description: String,
    pub size_bytes: u64,
    pub row_count: usize,
}

/// Per-worksheet details for the spreadsheet backend.
#[derive(Debug, Clone, Serialize)]
pub struct WorksheetInfo {
    pub name: String,
    pub rows: usize,
}

/// Where records currently live.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "storage_type")]
pub enum StorageInfo {
    #[serde(rename = "Local CSV Files")]
    FlatFile {
        location: String,
        files: Vec<TableFileInfo>,
    },
    #[serde(rename = "Google Sheets")]
    Spreadsheet {
        location: String,
        title: String,
        worksheets: Vec<WorksheetInfo>,
    },
}

/// Persistence contract shared by every backend.
///
/// Implementations must give identical upsert semantics: a row whose natural
/// key matches an existing row replaces it in place, otherwise it is appended.
#[async_trait]
pub trait RecordBackend: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// All data rows of a kind, in insertion order and canonical column order.
    async fn load_rows(&self, kind: RecordKind) -> Result<Rows, StoreError>;

    /// Insert or replace the row sharing `row`'s natural key.
    async fn upsert_row(
        &self,
        kind: RecordKind,
        row: Vec<String>,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Drop every data row of every kind, leaving header-only tables.
    async fn reset(&self) -> Result<(), StoreError>;

    async fn describe(&self) -> Result<StorageInfo, StoreError>;
}

/// Pick the backend for this session.
///
/// The spreadsheet backend is used when it is configured and its probe
/// succeeds; any failure falls back to flat files in `config.data_dir`.
pub async fn select_backend(config: &Config) -> Result<Arc<dyn RecordBackend>, StoreError> {
    if config.sheets_configured() {
        match SheetsBackend::connect(config).await {
            Ok(backend) => {
                tracing::info!("Connected to Google Sheets for data storage");
                return Ok(Arc::new(backend));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Google Sheets unavailable, falling back to CSV files");
            }
        }
    }

    let backend = FlatFileBackend::new(&config.data_dir)?;
    tracing::info!(data_dir = %config.data_dir.display(), "Using local CSV files for data storage");
    Ok(Arc::new(backend))
}
