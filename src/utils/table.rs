//! Reading input tables and writing result tables.
//!
//! Rows are typed: each flow's input and output structs carry serde renames
//! matching the column headers, so reading ignores extra columns and writing
//! emits a header row followed by one record per row.

use crate::core::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Output encoding of a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Comma-separated values with a header row, UTF-8.
    #[default]
    Csv,
    /// Pretty-printed JSON array of row objects.
    Json,
}

/// A result row with a fixed column layout.
///
/// `HEADERS` must list the serialized column names in field order; it is
/// written on its own when a table has no rows.
pub trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];
}

/// Headers of a CSV input, trimmed.
pub fn read_headers<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    Ok(csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect())
}

/// Fails with `MalformedInput` unless `column` is one of `headers`.
pub fn require_column(headers: &[String], column: &str) -> Result<()> {
    if headers.iter().any(|h| h == column) {
        Ok(())
    } else {
        Err(AppError::MalformedInput(format!(
            "CSV must contain a '{}' column.",
            column
        )))
    }
}

/// Deserializes every record of a CSV input into `T`.
///
/// Cell values are trimmed. Missing columns fall back to the field defaults
/// declared on `T`.
pub fn read_rows<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize().enumerate() {
        let row: T = record.map_err(|e| {
            tracing::error!("Failed to parse input row {}: {}", index + 1, e);
            e
        })?;
        rows.push(row);
    }
    tracing::debug!("Read {} input rows.", rows.len());
    Ok(rows)
}

/// Opens `path` and reads its rows, failing if a required column is absent.
pub fn read_rows_from_path<T: DeserializeOwned>(
    path: &Path,
    required_column: Option<&str>,
) -> Result<Vec<T>> {
    if let Some(column) = required_column {
        let headers = read_headers(BufReader::new(File::open(path)?))?;
        require_column(&headers, column)?;
    }
    read_rows(BufReader::new(File::open(path)?))
}

/// Writes `rows` in the requested format. A CSV table always starts with
/// its header row, even when `rows` is empty.
pub fn write_rows<T, W>(rows: &[T], writer: W, format: TableFormat) -> Result<()>
where
    T: TableRow,
    W: Write,
{
    match format {
        TableFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            if rows.is_empty() {
                csv_writer.write_record(T::HEADERS)?;
            }
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        TableFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
