//! Canonical Vehicle documents and the staged-to-canonical mapping

use chrono::NaiveDate;
use serde::Serialize;

use crate::import::record::StagedVehicle;

/// Fallback unit of measure for odometer readings.
const DEFAULT_UOM: &str = "Kilometer";
/// Fallback fuel type when the source does not carry one.
const DEFAULT_FUEL_TYPE: &str = "Petrol";

/// A Vehicle document ready for insertion. Mandatory fields are always
/// populated; optional fields mirror the staged record and are omitted
/// from the payload when absent.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub last_odometer: i64,
    pub uom: String,
    pub fuel_type: String,
    pub wheels: i64,
    pub doors: i64,
    pub vehicle_value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chassis_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_driver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_driver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvpi_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub istemarah_issue_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
}

/// Staged fields that must be present before promotion, reported under
/// their canonical names.
pub fn missing_mandatory(staged: &StagedVehicle) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if staged.plate_number.is_none() {
        missing.push("license_plate");
    }
    if staged.vehicle_maker.is_none() {
        missing.push("make");
    }
    if staged.vehicle_model.is_none() {
        missing.push("model");
    }
    missing
}

impl Vehicle {
    /// Map a staged record into a canonical Vehicle document, applying
    /// the documented defaults. Fails with the list of missing mandatory
    /// field names.
    pub fn from_staged(staged: &StagedVehicle) -> Result<Self, Vec<&'static str>> {
        let (Some(license_plate), Some(make), Some(model)) = (
            staged.plate_number.clone(),
            staged.vehicle_maker.clone(),
            staged.vehicle_model.clone(),
        ) else {
            return Err(missing_mandatory(staged));
        };

        Ok(Self {
            license_plate,
            make,
            model,
            last_odometer: 0,
            uom: DEFAULT_UOM.to_string(),
            fuel_type: DEFAULT_FUEL_TYPE.to_string(),
            wheels: 0,
            doors: 0,
            vehicle_value: 0.0,
            color: staged.major_color.clone(),
            chassis_no: staged.chassis_number.clone(),
            plate_type: staged.plate_type.clone(),
            branch_name: staged.branch_name.clone(),
            actual_driver_id: staged.actual_driver_id.clone(),
            actual_driver_name: staged.actual_driver_name.clone(),
            mvpi_status: staged.mvpi_status.clone(),
            insurance_status: staged.insurance_status.clone(),
            restriction_status: staged.restriction_status.clone(),
            istemarah_issue_date: staged.istemarah_issue_date,
            vehicle_status: staged.vehicle_status.clone(),
            body_type: staged.body_type.clone(),
            inspection_expiry_date: staged.inspection_expiry_date,
            ownership_date: staged.ownership_date,
            model_year: staged.model_year,
            sequence_number: staged.sequence_number.clone(),
        })
    }
}
