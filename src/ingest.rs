use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::RecordError;
use crate::startup::StartupRow;

/// One CSV data row, decoded or not.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedRow {
    /// 1-based line in the source, when known
    pub line: Option<u64>,
    pub row: Result<StartupRow, RecordError>,
}

impl From<StartupRow> for IngestedRow {
    fn from(row: StartupRow) -> Self {
        Self {
            line: None,
            row: Ok(row),
        }
    }
}

/// Read startup rows from CSV text with a header row.
///
/// Header names are matched case-insensitively after trimming; unknown
/// columns are ignored and absent ones leave the field empty. A row the
/// reader cannot decode is returned as a `Malformed` entry rather than
/// failing the whole file.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<IngestedRow>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: StringRecord = rdr
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match rdr.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|p| p.line());
                let row = record
                    .deserialize::<StartupRow>(Some(&headers))
                    .map_err(|e| RecordError::Malformed {
                        message: e.to_string(),
                    });
                // Skip lines that are entirely blank cells (e.g. trailing ",,,,")
                if matches!(row, Ok(ref r) if *r == StartupRow::default()) {
                    continue;
                }
                rows.push(IngestedRow { line, row });
            }
            Err(e) if e.is_io_error() => {
                return Err(e).context("Failed to read CSV input");
            }
            Err(e) => {
                // Undecodable row; the reader has already moved past it
                rows.push(IngestedRow {
                    line: e.position().map(|p| p.line()),
                    row: Err(RecordError::Malformed {
                        message: e.to_string(),
                    }),
                });
            }
        }
    }

    tracing::debug!(rows = rows.len(), "read CSV rows");
    Ok(rows)
}

/// Read startup rows from a CSV file on disk.
pub fn read_rows_from_path(path: &Path) -> Result<Vec<IngestedRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file at {}", path.display()))?;
    read_rows(file).with_context(|| format!("Failed to read CSV file at {}", path.display()))
}
