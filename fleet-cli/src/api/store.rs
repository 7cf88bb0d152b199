//! Document store abstraction over the Frappe backend
//!
//! The pipelines never own storage; they call through this trait, which
//! keeps them testable against an in-memory substitute. Validation,
//! persistence and per-record transaction atomicity are the store's
//! responsibility.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// CRUD surface the import and transfer pipelines need.
#[async_trait]
pub trait DocStore: Send + Sync {
    /// Whether any record of `doctype` has `field` equal to `value`.
    async fn exists(&self, doctype: &str, field: &str, value: &str) -> Result<bool>;

    /// Insert a new document. The store applies its own validation; a
    /// rejected document surfaces as an error.
    async fn insert(&self, doctype: &str, doc: Value) -> Result<()>;

    /// Fetch every document of `doctype` with all fields.
    async fn list_all(&self, doctype: &str) -> Result<Vec<Value>>;

    /// Read a single field from the document named `name`, or `None`
    /// when no such document exists.
    async fn get_value(&self, doctype: &str, name: &str, field: &str) -> Result<Option<String>>;
}
