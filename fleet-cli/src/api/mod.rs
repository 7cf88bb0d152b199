//! Frappe REST API module
//!
//! The pipelines talk to the site through the `DocStore` trait; the
//! reqwest-backed `FrappeClient` is the production implementation and an
//! in-memory store stands in for it under test.

pub mod client;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use client::FrappeClient;
pub use store::DocStore;
