//! Source spreadsheet column labels and their staged field names

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Labels that identify the header row inside the raw grid.
pub const HEADER_MARKERS: [&str; 2] = ["Plate Number", "Chassis Number"];

/// Staged fields that carry Hijri dates in the source file.
pub const HIJRI_DATE_FIELDS: [&str; 4] = [
    "ownership_date",
    "license_expiry_date",
    "inspection_expiry_date",
    "istemarah_issue_date",
];

/// Rename table from export labels to staged field names. The export
/// carries two differently-cased "Vehicle Status" columns; both are kept
/// under distinct names.
static COLUMN_RENAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Plate Number", "plate_number"),
        ("Plate Type", "plate_type"),
        ("Branch Name", "branch_name"),
        ("Vehicle Maker", "vehicle_maker"),
        ("Vehicle Model", "vehicle_model"),
        ("Model Year", "model_year"),
        ("Sequence Number", "sequence_number"),
        ("Chassis Number", "chassis_number"),
        ("Major Color", "major_color"),
        ("vehicle Status", "vehicle_status"),
        ("Ownership Date", "ownership_date"),
        ("License Expiry Date", "license_expiry_date"),
        ("Inspection Expiry Date", "inspection_expiry_date"),
        ("Actual Driver Id", "actual_driver_id"),
        ("Actual Driver Name", "actual_driver_name"),
        ("MVPI Status", "mvpi_status"),
        ("Insurance Status", "insurance_status"),
        ("Restriction Status", "restriction_status"),
        ("Istemarah issue Date", "istemarah_issue_date"),
        ("Vehicle Status", "vehicle_status2"),
        ("Body Type", "body_type"),
    ])
});

/// Map a header label to its staged field name. Unrecognized columns
/// return `None` and are dropped from the staged record.
pub fn canonical_field(label: &str) -> Option<&'static str> {
    COLUMN_RENAMES.get(label.trim()).copied()
}

/// Whether a staged field holds a Hijri date in the source file.
pub fn is_hijri_date_field(field: &str) -> bool {
    HIJRI_DATE_FIELDS.contains(&field)
}
