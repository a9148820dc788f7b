//! CSV export loader

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::row::Row;

const BOM: char = '\u{feff}';

/// A fully loaded export: header columns plus every data row
#[derive(Debug, Clone, Default)]
pub struct Export {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Load an export file from disk
pub fn load_export(path: &Path) -> Result<Export> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    read_export(file).with_context(|| format!("Failed to load CSV file: {}", path.display()))
}

/// Read an export from any reader.
///
/// The whole input is materialised up front. Rows with a different number of
/// fields than the header are accepted; missing trailing fields are simply
/// absent from the row.
pub fn read_export<R: Read>(reader: R) -> Result<Export> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                // Physical line, so quoted multi-line fields are counted
                let line = e
                    .position()
                    .map(|pos| pos.line())
                    .unwrap_or_else(|| reader.position().line());
                return Err(e).with_context(|| format!("Failed to parse CSV line {}", line));
            }
        }

        rows.push(Row::from_pairs(
            headers.iter().map(String::as_str).zip(record.iter()),
        ));
    }

    Ok(Export { headers, rows })
}
