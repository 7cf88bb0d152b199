//! Staged vehicle records as imported from registration spreadsheets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the registration export after renaming, sanitation and
/// date normalization. Absent cells stay `None` and are omitted from the
/// insert payload; the `Vehicle Data` doctype fills its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagedVehicle {
    /// Docname assigned by the store; present only on records read back.
    #[serde(skip_serializing)]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_maker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chassis_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_expiry_date: Option<NaiveDate>,
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
    pub vehicle_status2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
}

impl StagedVehicle {
    /// Build a staged record from a sanitized row map (staged field name
    /// to JSON value). Explicit per-field mapping; unknown keys in the
    /// map are ignored.
    pub fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            name: None,
            plate_number: get_str(row, "plate_number"),
            plate_type: get_str(row, "plate_type"),
            branch_name: get_str(row, "branch_name"),
            vehicle_maker: get_str(row, "vehicle_maker"),
            vehicle_model: get_str(row, "vehicle_model"),
            model_year: get_int(row, "model_year"),
            sequence_number: get_str(row, "sequence_number"),
            chassis_number: get_str(row, "chassis_number"),
            major_color: get_str(row, "major_color"),
            vehicle_status: get_str(row, "vehicle_status"),
            ownership_date: get_date(row, "ownership_date"),
            license_expiry_date: get_date(row, "license_expiry_date"),
            inspection_expiry_date: get_date(row, "inspection_expiry_date"),
            actual_driver_id: get_str(row, "actual_driver_id"),
            actual_driver_name: get_str(row, "actual_driver_name"),
            mvpi_status: get_str(row, "mvpi_status"),
            insurance_status: get_str(row, "insurance_status"),
            restriction_status: get_str(row, "restriction_status"),
            istemarah_issue_date: get_date(row, "istemarah_issue_date"),
            vehicle_status2: get_str(row, "vehicle_status2"),
            body_type: get_str(row, "body_type"),
        }
    }

}

/// Text fields also accept numeric cells (plates and sequence numbers
/// are sometimes typed as numbers in the export).
fn get_str(row: &Map<String, Value>, field: &str) -> Option<String> {
    match row.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn get_int(row: &Map<String, Value>, field: &str) -> Option<i64> {
    match row.get(field) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn get_date(row: &Map<String, Value>, field: &str) -> Option<NaiveDate> {
    match row.get(field) {
        Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_row_explicit_mapping() {
        let row = json!({
            "plate_number": "ABC-123",
            "chassis_number": "CH999",
            "vehicle_maker": "Toyota",
            "model_year": 2015,
            "sequence_number": 123456789,
            "license_expiry_date": "2025-03-31",
            "unknown_column": "ignored",
        });
        let staged = StagedVehicle::from_row(row.as_object().unwrap());

        assert_eq!(staged.plate_number.as_deref(), Some("ABC-123"));
        assert_eq!(staged.model_year, Some(2015));
        assert_eq!(staged.sequence_number.as_deref(), Some("123456789"));
        assert_eq!(
            staged.license_expiry_date,
            NaiveDate::from_ymd_opt(2025, 3, 31)
        );
        assert_eq!(staged.major_color, None);
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let row = json!({"plate_number": "ABC-123", "chassis_number": "CH999"});
        let staged = StagedVehicle::from_row(row.as_object().unwrap());
        let payload = serde_json::to_value(&staged).unwrap();

        assert_eq!(
            payload,
            json!({"plate_number": "ABC-123", "chassis_number": "CH999"})
        );
    }

    #[test]
    fn test_roundtrip_through_store_payload() {
        let doc = json!({
            "name": "VD-0001",
            "plate_number": "ABC-123",
            "chassis_number": "CH999",
            "ownership_date": "2023-07-19",
        });
        let staged: StagedVehicle = serde_json::from_value(doc).unwrap();
        assert_eq!(staged.name.as_deref(), Some("VD-0001"));
        assert_eq!(staged.ownership_date, NaiveDate::from_ymd_opt(2023, 7, 19));
    }
}
