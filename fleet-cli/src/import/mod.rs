//! Spreadsheet import pipeline: raw grid to staged `Vehicle Data` records
//!
//! A missing header row aborts the whole import; every other problem is
//! absorbed as a per-row outcome and summarized at the end.

pub mod columns;
pub mod excel;
pub mod hijri;
pub mod record;
pub mod sanitize;

use std::path::Path;

use anyhow::{Context, Result};
use calamine::Data;
use serde_json::{Map, Value};

use crate::api::DocStore;

use record::StagedVehicle;

/// Doctype staged rows are written to.
pub const STAGING_DOCTYPE: &str = "Vehicle Data";

/// Cap on messages sent to the error log; long rows are snipped.
const MAX_LOG_MESSAGE: usize = 140;

/// Outcome of one row of the staging loop.
#[derive(Debug)]
enum RowOutcome {
    Inserted,
    /// A record with this plate number is already staged.
    Duplicate,
    /// Plate or chassis number absent; the row never leaves the file.
    MissingIdentity,
    Failed(String),
}

/// Import a registration spreadsheet into the staging doctype.
pub async fn import_vehicle_data(store: &dyn DocStore, path: &Path) -> Result<String> {
    let rows = excel::read_grid(path)?;
    import_grid(store, &rows).await
}

/// Import an already-loaded cell grid. Split out from the file read so
/// tests can feed grids directly.
pub async fn import_grid(store: &dyn DocStore, rows: &[Vec<Data>]) -> Result<String> {
    let header_idx = excel::find_header_row(rows)
        .context("Header row not found. Please upload a valid vehicle file.")?;
    log::debug!("Header row located at offset {}", header_idx);

    let labels = excel::header_labels(&rows[header_idx]);
    let fields: Vec<Option<&'static str>> =
        labels.iter().map(|l| columns::canonical_field(l)).collect();

    let mut inserted = 0usize;
    let mut duplicates = 0usize;
    let mut missing = 0usize;
    let mut failed = 0usize;

    for row in rows.iter().skip(header_idx + 1) {
        if excel::is_blank_row(row) {
            continue;
        }

        let staged = stage_row(&fields, row);
        match write_staged(store, &staged).await {
            RowOutcome::Inserted => inserted += 1,
            RowOutcome::Duplicate => duplicates += 1,
            RowOutcome::MissingIdentity => missing += 1,
            RowOutcome::Failed(err) => {
                failed += 1;
                log_row_error("Vehicle Data Import Error", &staged, &err);
            }
        }
    }

    if missing > 0 {
        log::warn!("{} row(s) skipped due to missing mandatory fields.", missing);
    }

    let mut summary = format!(
        "Imported {} vehicle record(s) into {}.",
        inserted, STAGING_DOCTYPE
    );
    if duplicates > 0 {
        summary.push_str(&format!(" {} already staged.", duplicates));
    }
    if missing > 0 {
        summary.push_str(&format!(
            " {} skipped (missing plate or chassis number).",
            missing
        ));
    }
    if failed > 0 {
        summary.push_str(&format!(" {} failed (see error log).", failed));
    }
    Ok(summary)
}

/// Map one data row through rename, sanitation and date normalization.
fn stage_row(fields: &[Option<&'static str>], row: &[Data]) -> StagedVehicle {
    let mut map = Map::new();
    for (idx, field) in fields.iter().enumerate() {
        let Some(field) = field else { continue };
        let value = row.get(idx).map_or(Value::Null, |cell| cell_value(field, cell));
        if !value.is_null() {
            map.insert((*field).to_string(), value);
        }
    }
    StagedVehicle::from_row(&map)
}

fn cell_value(field: &str, cell: &Data) -> Value {
    if columns::is_hijri_date_field(field) {
        match hijri::normalize_date(cell) {
            Some(date) => Value::String(date.to_string()),
            None => Value::Null,
        }
    } else {
        sanitize::sanitize_cell(cell)
    }
}

/// Dedupe-and-insert for one staged row. Store errors become per-row
/// failures; the batch always continues.
async fn write_staged(store: &dyn DocStore, staged: &StagedVehicle) -> RowOutcome {
    let (Some(plate), Some(_chassis)) =
        (staged.plate_number.as_deref(), staged.chassis_number.as_deref())
    else {
        return RowOutcome::MissingIdentity;
    };

    match store.exists(STAGING_DOCTYPE, "plate_number", plate).await {
        Ok(true) => return RowOutcome::Duplicate,
        Ok(false) => {}
        Err(err) => return RowOutcome::Failed(err.to_string()),
    }

    let payload = match serde_json::to_value(staged) {
        Ok(payload) => payload,
        Err(err) => return RowOutcome::Failed(err.to_string()),
    };
    match store.insert(STAGING_DOCTYPE, payload).await {
        Ok(()) => RowOutcome::Inserted,
        Err(err) => RowOutcome::Failed(err.to_string()),
    }
}

fn log_row_error(title: &str, staged: &StagedVehicle, err: &str) {
    log::debug!("Insert error detail: {}", err);
    let snippet = serde_json::to_string(staged).unwrap_or_default();
    log::error!("{}: {}", title, truncate_message(&snippet));
}

/// Snip a row summary to the log channel's message cap.
fn truncate_message(snippet: &str) -> String {
    let msg = format!("Failed to insert row: {}", snippet);
    if msg.chars().count() <= MAX_LOG_MESSAGE {
        return msg;
    }
    let mut truncated: String = msg.chars().take(MAX_LOG_MESSAGE - 3).collect();
    truncated.push_str("...");
    truncated
}
