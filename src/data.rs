use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),
    #[error("duplicate column '{0}' in input header")]
    DuplicateHeader(String),
    #[error("malformed csv: {0}")]
    Parse(csv::Error),
    #[error("failed to write output: {0}")]
    Write(csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A fully materialized CSV file: header row plus data rows, all as raw
/// strings, in file order. Every row has exactly `header.len()` fields.
#[derive(Debug)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses a CSV file with a header row. Rows with a field count different
/// from the header are rejected, as are duplicate header names.
pub fn read_csv(path: &Path) -> Result<Table, DataError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => DataError::NotFound(path.to_path_buf()),
        _ => DataError::Io(err),
    })?;

    let mut csv_reader = csv::ReaderBuilder::new().from_reader(file);

    let header: Vec<String> = csv_reader
        .headers()
        .map_err(DataError::Parse)?
        .iter()
        .map(str::to_string)
        .collect();

    for (i, name) in header.iter().enumerate() {
        if header[..i].contains(name) {
            return Err(DataError::DuplicateHeader(name.clone()));
        }
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(DataError::Parse)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!("read {} data rows from {}", rows.len(), path.display());

    Ok(Table { header, rows })
}

/// Writes header then rows to `path`, truncating any previous content.
pub fn write_csv(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<(), DataError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(DataError::Write)?;

    csv_writer.write_record(header).map_err(DataError::Write)?;
    for row in rows {
        csv_writer.write_record(row).map_err(DataError::Write)?;
    }
    csv_writer.flush()?;

    debug!("wrote {} data rows to {}", rows.len(), path.display());

    Ok(())
}
