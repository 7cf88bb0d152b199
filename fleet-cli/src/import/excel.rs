//! Raw grid reading and header detection for registration spreadsheets
//!
//! Exports arrive with an arbitrary number of banner rows above the real
//! header, so the grid is read without headers first and the header row
//! is located by its marker labels.

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::path::Path;

use super::columns::HEADER_MARKERS;
use super::sanitize::sanitize_cell;

/// Load the first worksheet as an untyped cell grid.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<Data>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Spreadsheet has no worksheets")?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    Ok(range.rows().map(|r| r.to_vec()).collect())
}

/// Locate the header row: the first row whose cells contain every marker
/// label. Rows above it are banner noise.
pub fn find_header_row(rows: &[Vec<Data>]) -> Option<usize> {
    rows.iter().position(|row| {
        HEADER_MARKERS.iter().all(|marker| {
            row.iter()
                .any(|cell| matches!(cell, Data::String(s) if s.trim() == *marker))
        })
    })
}

/// Read the header row's cells as labels; non-text cells become empty
/// labels and match no known column.
pub fn header_labels(row: &[Data]) -> Vec<String> {
    row.iter()
        .map(|cell| match cell {
            Data::String(s) => s.trim().to_string(),
            _ => String::new(),
        })
        .collect()
}

/// Whether every cell in the row sanitizes to null. Worksheet ranges
/// routinely extend past the data block with formatting-only rows.
pub fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| sanitize_cell(cell).is_null())
}
