//! Promotion of staged records into canonical Vehicle documents
//!
//! Custom fields are provisioned first, then every staged record is
//! validated, mapped and inserted. Per-row problems are collected and
//! itemized in the summary; only store-level failures before the loop
//! abort the transfer.

pub mod fields;
pub mod vehicle;

use anyhow::Result;

use crate::api::DocStore;
use crate::import::STAGING_DOCTYPE;
use crate::import::record::StagedVehicle;

use vehicle::Vehicle;

/// Doctype canonical records are written to.
pub const VEHICLE_DOCTYPE: &str = "Vehicle";

/// Transfer every staged record into the Vehicle doctype.
pub async fn transfer_to_vehicle(store: &dyn DocStore) -> Result<String> {
    fields::ensure_custom_fields(store, VEHICLE_DOCTYPE, &fields::vehicle_custom_fields()).await?;

    let staged_docs = store.list_all(STAGING_DOCTYPE).await?;
    log::info!("Transferring {} staged record(s)", staged_docs.len());

    let mut transferred = 0usize;
    let mut already = 0usize;
    let mut skipped: Vec<String> = Vec::new();

    for doc in staged_docs {
        let staged: StagedVehicle = match serde_json::from_value(doc) {
            Ok(staged) => staged,
            Err(err) => {
                skipped.push(format!("- Row: (unreadable), Error: {}", err));
                continue;
            }
        };
        let row_id = staged
            .plate_number
            .clone()
            .or_else(|| staged.name.clone())
            .unwrap_or_else(|| "(unnamed)".to_string());

        let vehicle = match Vehicle::from_staged(&staged) {
            Ok(vehicle) => vehicle,
            Err(missing) => {
                skipped.push(format!("- Row: {}, Missing: {}", row_id, missing.join(", ")));
                continue;
            }
        };

        // Re-runs stay idempotent, mirroring the staging dedupe.
        match store
            .exists(VEHICLE_DOCTYPE, "license_plate", &vehicle.license_plate)
            .await
        {
            Ok(true) => {
                already += 1;
                continue;
            }
            Ok(false) => {}
            Err(err) => {
                skipped.push(format!("- Row: {}, Error: {}", row_id, err));
                continue;
            }
        }

        let payload = match serde_json::to_value(&vehicle) {
            Ok(payload) => payload,
            Err(err) => {
                skipped.push(format!("- Row: {}, Error: {}", row_id, err));
                continue;
            }
        };
        match store.insert(VEHICLE_DOCTYPE, payload).await {
            Ok(()) => transferred += 1,
            Err(err) => skipped.push(format!("- Row: {}, Error: {}", row_id, err)),
        }
    }

    let mut message = format!("Transferred {} vehicle(s).", transferred);
    if already > 0 {
        message.push_str(&format!(" {} already transferred.", already));
    }
    if !skipped.is_empty() {
        message.push_str(&format!(
            "\nSkipped {} record(s) due to issues:\n{}",
            skipped.len(),
            skipped.join("\n")
        ));
    }
    Ok(message)
}
