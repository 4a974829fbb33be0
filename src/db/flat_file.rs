// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local CSV backend: one file per record kind under a data directory.
//!
//! Every write re-reads the whole table, applies the upsert in memory, and
//! replaces the file. Writes go to a sibling temp file first, which is synced
//! and then renamed over the table.

use super::table::{self, align_rows, decode_csv, encode_csv};
use super::{RecordBackend, Rows, StorageInfo, TableFileInfo, UpsertOutcome};
use crate::error::StoreError;
use crate::models::RecordKind;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// CSV files in a local directory.
pub struct FlatFileBackend {
    data_dir: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FlatFileBackend {
    /// Open (creating if needed) the data directory and header-only tables.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let backend = Self {
            data_dir,
            write_lock: Mutex::new(()),
        };
        for kind in RecordKind::ALL {
            backend.initialize_table(kind)?;
        }
        Ok(backend)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the CSV file holding `kind`.
    pub fn table_path(&self, kind: RecordKind) -> PathBuf {
        self.data_dir.join(format!("{}.csv", kind.table_name()))
    }

    fn initialize_table(&self, kind: RecordKind) -> Result<(), StoreError> {
        let path = self.table_path(kind);
        if !path.exists() {
            std::fs::write(&path, encode_csv(kind, &[])?)?;
            tracing::debug!(path = %path.display(), "Created table");
        }
        Ok(())
    }

    async fn read_table(&self, kind: RecordKind) -> Result<Rows, StoreError> {
        let path = self.table_path(kind);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let (header, rows) = decode_csv(&data)?;
        Ok(align_rows(kind, &header, rows))
    }

    /// Write `rows` to the table's temp file and sync it to disk.
    async fn stage_table(
        &self,
        kind: RecordKind,
        rows: &[Vec<String>],
    ) -> Result<PathBuf, StoreError> {
        let tmp = self.table_path(kind).with_extension("csv.tmp");

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&encode_csv(kind, rows)?).await?;
        file.sync_all().await?;
        Ok(tmp)
    }

    async fn write_table(&self, kind: RecordKind, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let tmp = self.stage_table(kind, rows).await?;
        tokio::fs::rename(&tmp, self.table_path(kind)).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordBackend for FlatFileBackend {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn load_rows(&self, kind: RecordKind) -> Result<Rows, StoreError> {
        self.read_table(kind).await
    }

    async fn upsert_row(
        &self,
        kind: RecordKind,
        row: Vec<String>,
    ) -> Result<UpsertOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.read_table(kind).await?;
        let result = table::upsert(kind, &mut rows, row);
        self.write_table(kind, &rows).await?;

        tracing::debug!(
            kind = %kind,
            outcome = ?result.outcome,
            index = result.index,
            removed_duplicates = result.removed_duplicates,
            "Upserted CSV row"
        );
        Ok(result.outcome)
    }

    async fn reset(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        // Stage every empty table before replacing any, so a failure leaves
        // all tables as they were.
        let mut staged = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            match self.stage_table(kind, &[]).await {
                Ok(tmp) => staged.push((tmp, self.table_path(kind))),
                Err(e) => {
                    for (tmp, _) in &staged {
                        let _ = tokio::fs::remove_file(tmp).await;
                    }
                    return Err(e);
                }
            }
        }
        for (tmp, path) in staged {
            tokio::fs::rename(&tmp, &path).await?;
        }

        tracing::info!(data_dir = %self.data_dir.display(), "Reset all CSV tables");
        Ok(())
    }

    async fn describe(&self) -> Result<StorageInfo, StoreError> {
        let location = std::path::absolute(&self.data_dir)?;
        let mut files = Vec::with_capacity(RecordKind::ALL.len());

        for kind in RecordKind::ALL {
            let path = self.table_path(kind);
            let size_bytes = match tokio::fs::metadata(&path).await {
                Ok(meta) => meta.len(),
                Err(_) => 0,
            };
            let row_count = self.read_table(kind).await.map(|r| r.len()).unwrap_or(0);

            files.push(TableFileInfo {
                name: format!("{}.csv", kind.table_name()),
                path: location
                    .join(format!("{}.csv", kind.table_name()))
                    .display()
                    .to_string(),
                description: kind.description().to_string(),
                size_bytes,
                row_count,
            });
        }

        Ok(StorageInfo::FlatFile {
            location: location.display().to_string(),
            files,
        })
    }
}
