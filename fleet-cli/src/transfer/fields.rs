//! Custom field provisioning for the Vehicle doctype
//!
//! The registration import carries columns the stock Vehicle doctype
//! does not have; they are created as Custom Fields before the first
//! transfer insert runs. Provisioning is idempotent and never mutates
//! an existing field across types.

use anyhow::Result;
use serde_json::json;

use crate::api::DocStore;

/// Frappe field types the provisioner creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Data,
    Date,
    Int,
    ColumnBreak,
    SectionBreak,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Data => "Data",
            FieldType::Date => "Date",
            FieldType::Int => "Int",
            FieldType::ColumnBreak => "Column Break",
            FieldType::SectionBreak => "Section Break",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A custom field to ensure on the target doctype.
#[derive(Debug, Clone)]
pub struct CustomFieldDef {
    pub fieldname: &'static str,
    pub fieldtype: FieldType,
    /// Explicit label; defaults to the title-cased fieldname.
    pub label: Option<&'static str>,
    pub insert_after: Option<&'static str>,
}

impl CustomFieldDef {
    pub fn new(fieldname: &'static str, fieldtype: FieldType) -> Self {
        Self {
            fieldname,
            fieldtype,
            label: None,
            insert_after: None,
        }
    }

    pub fn labeled(fieldname: &'static str, fieldtype: FieldType, label: &'static str) -> Self {
        Self {
            label: Some(label),
            ..Self::new(fieldname, fieldtype)
        }
    }

    pub fn after(mut self, anchor: &'static str) -> Self {
        self.insert_after = Some(anchor);
        self
    }
}

/// Fields the Vehicle doctype needs before a transfer can run. Layout
/// pseudo-fields come last, anchored under the plate field.
pub fn vehicle_custom_fields() -> Vec<CustomFieldDef> {
    use FieldType::*;

    vec![
        CustomFieldDef::new("plate_type", Data),
        CustomFieldDef::new("branch_name", Data),
        CustomFieldDef::labeled("actual_driver_id", Data, "Actual Driver ID"),
        CustomFieldDef::new("actual_driver_name", Data),
        CustomFieldDef::labeled("mvpi_status", Data, "MVPI Status"),
        CustomFieldDef::new("insurance_status", Data),
        CustomFieldDef::new("restriction_status", Data),
        CustomFieldDef::new("istemarah_issue_date", Date),
        CustomFieldDef::new("vehicle_status", Data),
        CustomFieldDef::new("body_type", Data),
        CustomFieldDef::new("inspection_expiry_date", Date),
        CustomFieldDef::new("ownership_date", Date),
        CustomFieldDef::new("model_year", Int),
        CustomFieldDef::new("sequence_number", Data),
        CustomFieldDef::labeled("__break1", ColumnBreak, "Column Break").after("license_plate"),
        CustomFieldDef::labeled("__break2", SectionBreak, "Additional Info").after("license_plate"),
    ]
}

/// Ensure every definition exists on the doctype exactly once.
pub async fn ensure_custom_fields(
    store: &dyn DocStore,
    doctype: &str,
    defs: &[CustomFieldDef],
) -> Result<()> {
    for def in defs {
        ensure_custom_field(store, doctype, def).await?;
    }
    Ok(())
}

async fn ensure_custom_field(
    store: &dyn DocStore,
    doctype: &str,
    def: &CustomFieldDef,
) -> Result<()> {
    let name = format!("{}-{}", doctype, def.fieldname);

    if let Some(existing) = store.get_value("Custom Field", &name, "fieldtype").await? {
        if existing != def.fieldtype.as_str() {
            // Changing a fieldtype in place risks the stored data; leave
            // it to a manual Customize Form decision.
            log::warn!(
                "Cannot change fieldtype of '{}' from '{}' to '{}'. Please delete manually via Customize Form.",
                def.fieldname,
                existing,
                def.fieldtype
            );
        }
        return Ok(());
    }

    let label = def
        .label
        .map(str::to_string)
        .unwrap_or_else(|| default_label(def.fieldname));
    log::debug!("Creating custom field {} ({})", name, def.fieldtype);

    let doc = json!({
        "dt": doctype,
        "fieldname": def.fieldname,
        "fieldtype": def.fieldtype.as_str(),
        "label": label,
        "insert_after": def.insert_after,
    });
    store.insert("Custom Field", doc).await
}

/// Default label: underscores to spaces, each word capitalized.
fn default_label(fieldname: &str) -> String {
    fieldname
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
