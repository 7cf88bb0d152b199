//! In-memory document store for pipeline tests

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::Value;

use super::store::DocStore;

/// Doctype-to-documents map with optional injected insert failures,
/// standing in for a Frappe site.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, Vec<Value>>>,
    rejects: Mutex<Vec<(String, String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make inserts fail whenever `doc[field] == value` on `doctype`,
    /// simulating a store-side validation error.
    pub fn reject(&self, doctype: &str, field: &str, value: &str) {
        self.rejects.lock().unwrap().push((
            doctype.to_string(),
            field.to_string(),
            value.to_string(),
        ));
    }

    /// Seed a document directly, bypassing reject rules.
    pub fn seed(&self, doctype: &str, doc: Value) {
        self.docs
            .lock()
            .unwrap()
            .entry(doctype.to_string())
            .or_default()
            .push(doc);
    }

    pub fn count(&self, doctype: &str) -> usize {
        self.docs
            .lock()
            .unwrap()
            .get(doctype)
            .map_or(0, Vec::len)
    }

    pub fn find(&self, doctype: &str, field: &str, value: &str) -> Option<Value> {
        self.docs
            .lock()
            .unwrap()
            .get(doctype)?
            .iter()
            .find(|doc| field_matches(doc, field, value))
            .cloned()
    }
}

fn field_matches(doc: &Value, field: &str, value: &str) -> bool {
    match doc.get(field) {
        Some(Value::String(s)) => s == value,
        Some(other) => other.to_string() == value,
        None => false,
    }
}

#[async_trait]
impl DocStore for MemoryStore {
    async fn exists(&self, doctype: &str, field: &str, value: &str) -> Result<bool> {
        Ok(self.find(doctype, field, value).is_some())
    }

    async fn insert(&self, doctype: &str, mut doc: Value) -> Result<()> {
        for (dt, field, value) in self.rejects.lock().unwrap().iter() {
            if dt == doctype && field_matches(&doc, field, value) {
                bail!("ValidationError: {} rejected by test store", doctype);
            }
        }

        // Frappe names custom fields "{dt}-{fieldname}"; mirror that so
        // get_value lookups work the way the provisioner expects.
        if doctype == "Custom Field" {
            if let (Some(dt), Some(fieldname)) = (
                doc.get("dt").and_then(Value::as_str),
                doc.get("fieldname").and_then(Value::as_str),
            ) {
                let name = format!("{}-{}", dt, fieldname);
                if let Some(obj) = doc.as_object_mut() {
                    obj.insert("name".to_string(), Value::String(name));
                }
            }
        }

        self.docs
            .lock()
            .unwrap()
            .entry(doctype.to_string())
            .or_default()
            .push(doc);
        Ok(())
    }

    async fn list_all(&self, doctype: &str) -> Result<Vec<Value>> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .get(doctype)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_value(&self, doctype: &str, name: &str, field: &str) -> Result<Option<String>> {
        Ok(self
            .find(doctype, "name", name)
            .and_then(|doc| doc.get(field).and_then(Value::as_str).map(str::to_string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_exists() {
        let store = MemoryStore::new();
        store
            .insert("Vehicle Data", json!({"plate_number": "ABC-123"}))
            .await
            .unwrap();

        assert!(store.exists("Vehicle Data", "plate_number", "ABC-123").await.unwrap());
        assert!(!store.exists("Vehicle Data", "plate_number", "XYZ-999").await.unwrap());
        assert_eq!(store.count("Vehicle Data"), 1);
    }

    #[tokio::test]
    async fn test_reject_rule_fails_insert() {
        let store = MemoryStore::new();
        store.reject("Vehicle", "license_plate", "BAD-1");

        let err = store
            .insert("Vehicle", json!({"license_plate": "BAD-1"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ValidationError"));
        assert_eq!(store.count("Vehicle"), 0);
    }

    #[tokio::test]
    async fn test_custom_field_naming() {
        let store = MemoryStore::new();
        store
            .insert(
                "Custom Field",
                json!({"dt": "Vehicle", "fieldname": "plate_type", "fieldtype": "Data"}),
            )
            .await
            .unwrap();

        let fieldtype = store
            .get_value("Custom Field", "Vehicle-plate_type", "fieldtype")
            .await
            .unwrap();
        assert_eq!(fieldtype.as_deref(), Some("Data"));
    }
}
