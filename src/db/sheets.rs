// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Sheets backend: one worksheet per record kind in one document.
//!
//! The Sheets API has no upsert, so writes fetch the worksheet, locate the
//! key with the same helper the CSV backend uses, and then overwrite the
//! matching row range or append.

use super::table::{self, align_rows, header_row, is_canonical_header};
use super::{RecordBackend, Rows, StorageInfo, UpsertOutcome, WorksheetInfo};
use crate::config::Config;
use crate::error::StoreError;
use crate::models::RecordKind;
use crate::services::sheets::{ServiceAccountKey, SheetsClient};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// Title used when no spreadsheet is configured and one must be created.
pub const DEFAULT_SPREADSHEET_TITLE: &str = "Fitness Tracker Data";

/// Last column of every table (the widest kind has 11 columns).
const LAST_COLUMN: &str = "Z";

/// Data rows of a worksheet.
#[derive(Default)]
struct SheetTable {
    rows: Rows,
    /// Header is canonical and no blank rows were dropped, so data row `i`
    /// is sheet row `i + 2`.
    canonical: bool,
}

pub struct SheetsBackend {
    client: SheetsClient,
    /// Worksheets known to exist; also serializes read-modify-write cycles.
    known_sheets: Mutex<HashSet<RecordKind>>,
}

impl SheetsBackend {
    /// Connect and probe the configured spreadsheet.
    ///
    /// Creates a new spreadsheet when credentials exist but no id is set.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let key_path = config
            .google_credentials_path
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("No Google credentials configured".to_string()))?;
        let key = ServiceAccountKey::from_file(key_path)?;

        let mut client = SheetsClient::new(
            key,
            config.spreadsheet_id.clone().unwrap_or_default(),
            config.sheets_api_url.clone(),
            config.google_token_url.clone(),
        )?;

        let spreadsheet = if config.spreadsheet_id.is_some() {
            client.get_spreadsheet().await?
        } else {
            let created = client.create_spreadsheet(DEFAULT_SPREADSHEET_TITLE).await?;
            tracing::info!(url = %created.spreadsheet_url, "Created new spreadsheet");
            client.set_spreadsheet_id(created.spreadsheet_id.clone());
            created
        };

        tracing::info!(
            spreadsheet = %spreadsheet.properties.title,
            id = %spreadsheet.spreadsheet_id,
            "Connected to Google Sheets"
        );

        Ok(Self::with_client(client, &spreadsheet_kinds(&spreadsheet)))
    }

    /// Wrap an already-probed client.
    pub fn with_client(client: SheetsClient, existing: &[RecordKind]) -> Self {
        Self {
            client,
            known_sheets: Mutex::new(existing.iter().copied().collect()),
        }
    }

    /// Create the worksheet with a header row if it is not known to exist.
    async fn ensure_sheet(
        &self,
        kind: RecordKind,
        known: &mut HashSet<RecordKind>,
    ) -> Result<(), StoreError> {
        if known.contains(&kind) {
            return Ok(());
        }

        let spreadsheet = self.client.get_spreadsheet().await?;
        if !spreadsheet.has_sheet(kind.table_name()) {
            self.client.add_sheet(kind.table_name()).await?;
            self.client
                .update_values(&format!("{}!A1", kind.table_name()), &[header_row(kind)])
                .await?;
        }
        known.insert(kind);
        Ok(())
    }

    /// Read an existing worksheet.
    async fn read_sheet(&self, kind: RecordKind) -> Result<SheetTable, StoreError> {
        let mut values = self
            .client
            .get_values(&format!("{}!A1:{}", kind.table_name(), LAST_COLUMN))
            .await?;

        if values.is_empty() {
            return Ok(SheetTable::default());
        }
        let header = values.remove(0);
        let raw_len = values.len();
        let rows = align_rows(kind, &header, values);
        Ok(SheetTable {
            canonical: is_canonical_header(kind, &header) && rows.len() == raw_len,
            rows,
        })
    }

    /// Replace the whole worksheet body with canonical header and rows.
    ///
    /// The new grid is written over the old one before anything is cleared,
    /// so a failed write leaves the stored rows in place.
    async fn rewrite_sheet(&self, kind: RecordKind, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let name = kind.table_name();

        let mut all = Vec::with_capacity(rows.len() + 1);
        all.push(header_row(kind));
        all.extend_from_slice(rows);
        self.client.update_values(&format!("{}!A1", name), &all).await?;

        // Leftover rows below the grid and stray columns to its right.
        self.client
            .clear_values(&format!("{}!A{}:{}", name, all.len() + 1, LAST_COLUMN))
            .await?;
        let width = kind.columns().len();
        if width < 26 {
            let next_column = char::from(b'A' + width as u8);
            self.client
                .clear_values(&format!("{}!{}1:{}", name, next_column, LAST_COLUMN))
                .await?;
        }
        Ok(())
    }
}

/// Record kinds whose worksheet already exists in `spreadsheet`.
fn spreadsheet_kinds(spreadsheet: &crate::services::sheets::Spreadsheet) -> Vec<RecordKind> {
    RecordKind::ALL
        .into_iter()
        .filter(|k| spreadsheet.has_sheet(k.table_name()))
        .collect()
}

#[async_trait]
impl RecordBackend for SheetsBackend {
    fn name(&self) -> &'static str {
        "google_sheets"
    }

    async fn load_rows(&self, kind: RecordKind) -> Result<Rows, StoreError> {
        {
            let known = self.known_sheets.lock().await;
            if !known.contains(&kind) {
                // Missing worksheet means no data yet.
                let spreadsheet = self.client.get_spreadsheet().await?;
                if !spreadsheet.has_sheet(kind.table_name()) {
                    return Ok(Vec::new());
                }
            }
        }
        Ok(self.read_sheet(kind).await?.rows)
    }

    async fn upsert_row(
        &self,
        kind: RecordKind,
        row: Vec<String>,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut known = self.known_sheets.lock().await;
        self.ensure_sheet(kind, &mut known).await?;

        let SheetTable {
            mut rows,
            canonical,
        } = self.read_sheet(kind).await?;
        let result = table::upsert(kind, &mut rows, row);
        let name = kind.table_name();

        if !canonical || result.removed_duplicates > 0 {
            // Row positions no longer line up with the sheet; rewrite it all.
            self.rewrite_sheet(kind, &rows).await?;
        } else {
            let written = &rows[result.index];
            match result.outcome {
                UpsertOutcome::Updated => {
                    // Data row i lives on sheet row i + 2 (1-based, after header).
                    let range = format!("{}!A{}", name, result.index + 2);
                    self.client
                        .update_values(&range, std::slice::from_ref(written))
                        .await?;
                }
                UpsertOutcome::Inserted => {
                    self.client
                        .append_values(&format!("{}!A1", name), std::slice::from_ref(written))
                        .await?;
                }
            }
        }

        tracing::debug!(
            kind = %kind,
            outcome = ?result.outcome,
            removed_duplicates = result.removed_duplicates,
            "Upserted worksheet row"
        );
        Ok(result.outcome)
    }

    async fn reset(&self) -> Result<(), StoreError> {
        let _known = self.known_sheets.lock().await;
        let spreadsheet = self.client.get_spreadsheet().await?;

        for kind in RecordKind::ALL {
            if !spreadsheet.has_sheet(kind.table_name()) {
                continue;
            }
            self.client
                .clear_values(&format!("{}!A2:{}", kind.table_name(), LAST_COLUMN))
                .await?;
        }

        tracing::info!("Reset all worksheets");
        Ok(())
    }

    async fn describe(&self) -> Result<StorageInfo, StoreError> {
        let spreadsheet = self.client.get_spreadsheet().await?;
        let mut worksheets = Vec::new();

        for kind in spreadsheet_kinds(&spreadsheet) {
            let table = self.read_sheet(kind).await?;
            worksheets.push(WorksheetInfo {
                name: kind.table_name().to_string(),
                rows: table.rows.len(),
            });
        }

        Ok(StorageInfo::Spreadsheet {
            location: spreadsheet.spreadsheet_url,
            title: spreadsheet.properties.title,
            worksheets,
        })
    }
}
