// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend-independent operations on text tables.

use super::{Rows, UpsertOutcome};
use crate::models::{RecordKey, RecordKind};

/// Result of applying an upsert to an in-memory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub outcome: UpsertOutcome,
    /// Index of the written row among the data rows.
    pub index: usize,
    /// Extra rows with the same key that were dropped.
    pub removed_duplicates: usize,
}

/// Reorder raw rows read under `header` into canonical column order.
///
/// Columns are matched by name, so reordered files still load; absent
/// columns become empty cells and blank rows are dropped.
pub fn align_rows(kind: RecordKind, header: &[String], rows: Rows) -> Rows {
    let positions: Vec<Option<usize>> = kind
        .columns()
        .iter()
        .map(|col| header.iter().position(|h| h.trim() == *col))
        .collect();

    rows.into_iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            positions
                .iter()
                .map(|pos| pos.and_then(|i| row.get(i).cloned()).unwrap_or_default())
                .collect()
        })
        .collect()
}

/// True when `header` is exactly the canonical header for `kind`.
pub fn is_canonical_header(kind: RecordKind, header: &[String]) -> bool {
    header.len() == kind.columns().len()
        && header.iter().zip(kind.columns()).all(|(h, c)| h.trim() == *c)
}

pub fn header_row(kind: RecordKind) -> Vec<String> {
    kind.columns().iter().map(|c| c.to_string()).collect()
}

/// Pad or truncate a row to the column count of `kind`.
pub fn normalize_row(kind: RecordKind, mut row: Vec<String>) -> Vec<String> {
    row.resize(kind.columns().len(), String::new());
    row
}

/// Replace the row sharing `row`'s natural key, or append it.
///
/// The first matching row is overwritten in place and any later rows with
/// the same key are removed, so at most one row per key remains. Rows whose
/// key cannot be read are left untouched.
pub fn upsert(kind: RecordKind, rows: &mut Rows, row: Vec<String>) -> Upserted {
    let row = normalize_row(kind, row);
    let key = RecordKey::from_row(kind, &row);

    let matches: Vec<usize> = match &key {
        Some(key) => rows
            .iter()
            .enumerate()
            .filter(|(_, existing)| RecordKey::from_row(kind, existing).as_ref() == Some(key))
            .map(|(i, _)| i)
            .collect(),
        None => Vec::new(),
    };

    match matches.split_first() {
        Some((&first, rest)) => {
            rows[first] = row;
            for &dup in rest.iter().rev() {
                rows.remove(dup);
            }
            Upserted {
                outcome: UpsertOutcome::Updated,
                index: first,
                removed_duplicates: rest.len(),
            }
        }
        None => {
            rows.push(row);
            Upserted {
                outcome: UpsertOutcome::Inserted,
                index: rows.len() - 1,
                removed_duplicates: 0,
            }
        }
    }
}

/// Serialize a header plus rows as CSV.
pub fn encode_csv(kind: RecordKind, rows: &[Vec<String>]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(kind.columns())?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// Parse CSV text into (header, data rows).
pub fn decode_csv(data: &[u8]) -> Result<(Vec<String>, Rows), csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let header = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_upsert_appends_new_key() {
        let mut rows = vec![row(&["2024-01-15", "2024-W02", "80"])];
        let result = upsert(RecordKind::BodyMetrics, &mut rows, row(&["2024-01-16", "2024-W02", "79"]));

        assert_eq!(result.outcome, UpsertOutcome::Inserted);
        assert_eq!(result.index, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].len(), RecordKind::BodyMetrics.columns().len());
    }

    #[test]
    fn test_upsert_overwrites_matching_date_format() {
        // Existing row written by a datetime-typed exporter.
        let mut rows = vec![row(&["2024-01-15 00:00:00", "2024-W02", "80"])];
        let result = upsert(RecordKind::BodyMetrics, &mut rows, row(&["2024-01-15", "2024-W02", "79.5"]));

        assert_eq!(result.outcome, UpsertOutcome::Updated);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "2024-01-15");
        assert_eq!(rows[0][2], "79.5");
    }

    #[test]
    fn test_upsert_keys_on_day_for_workouts() {
        let mut rows = vec![row(&["2024-01-15", "2024-W02", "Monday", "Push", "False"])];

        let other_day = upsert(
            RecordKind::Workout,
            &mut rows,
            row(&["2024-01-15", "2024-W02", "Tuesday", "Pull", "True"]),
        );
        assert_eq!(other_day.outcome, UpsertOutcome::Inserted);

        let same_day = upsert(
            RecordKind::Workout,
            &mut rows,
            row(&["2024-01-15", "2024-W02", "Monday", "Push", "True"]),
        );
        assert_eq!(same_day.outcome, UpsertOutcome::Updated);
        assert_eq!(same_day.index, 0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][4], "True");
    }

    #[test]
    fn test_upsert_collapses_duplicates() {
        let mut rows = vec![
            row(&["2024-01-15", "w", "Monday", "Push", "False"]),
            row(&["2024-01-16", "w", "Tuesday", "Pull", "True"]),
            row(&["2024-01-15", "w", "Monday", "Push", "False"]),
        ];
        let result = upsert(
            RecordKind::Workout,
            &mut rows,
            row(&["2024-01-15", "w", "Monday", "Push", "True"]),
        );

        assert_eq!(result.removed_duplicates, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][4], "True");
        assert_eq!(rows[1][2], "Tuesday");
    }

    #[test]
    fn test_upsert_leaves_unreadable_rows() {
        let mut rows = vec![row(&["garbage", "", "81"])];
        upsert(RecordKind::BodyMetrics, &mut rows, row(&["2024-01-15", "", "80"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "garbage");
    }

    #[test]
    fn test_align_rows_by_header_name() {
        let header = row(&["weight", "date", "extra"]);
        let rows = vec![row(&["80", "2024-01-15", "x"]), row(&["", "", ""])];
        let aligned = align_rows(RecordKind::BodyMetrics, &header, rows);

        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0][0], "2024-01-15");
        assert_eq!(aligned[0][2], "80");
        assert_eq!(aligned[0][3], "");
    }

    #[test]
    fn test_csv_round_trip_preserves_quoting() {
        let rows = vec![normalize_row(
            RecordKind::Diet,
            row(&["2024-01-15", "2024-W02", "Monday", "4", "", "5", "6", "skipped snack, \"cheat\" meal"]),
        )];
        let bytes = encode_csv(RecordKind::Diet, &rows).unwrap();
        let (header, decoded) = decode_csv(&bytes).unwrap();

        assert!(is_canonical_header(RecordKind::Diet, &header));
        assert_eq!(decoded, rows);
    }

    #[test]
    fn test_decode_header_only() {
        let bytes = encode_csv(RecordKind::Workout, &[]).unwrap();
        let (header, rows) = decode_csv(&bytes).unwrap();
        assert_eq!(header, header_row(RecordKind::Workout));
        assert!(rows.is_empty());
    }
}
