//! Cell sanitation: hyphen placeholders and blanks become explicit nulls
//!
//! Runs before date normalization and before the mandatory-field checks,
//! both of which rely on "absent" being null rather than an empty string.

use calamine::Data;
use serde_json::{Value, json};

/// Convert a spreadsheet cell to a JSON value.
///
/// The registration exports use `-` for "no value"; it and blank or
/// whitespace-only text map to null. Kept strings are trimmed, and
/// whole-number floats collapse to integers (spreadsheets store every
/// number as a float).
pub fn sanitize_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if is_blank(s) => Value::Null,
        Data::String(s) => Value::String(s.trim().to_string()),
        Data::Int(i) => json!(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                json!(*f as i64)
            } else {
                json!(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => Value::String(dt.date().to_string()),
            None => Value::Null,
        },
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

/// `-` and whitespace-only strings stand for "no value" in the source files.
fn is_blank(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || trimmed == "-"
}
