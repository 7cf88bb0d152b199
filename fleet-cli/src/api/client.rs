//! HTTP client for the Frappe REST API
//!
//! Documents live under `/api/resource/{doctype}`; requests carry a
//! token header built from the site's API key and secret. Doctype and
//! docname path segments are percent-encoded because doctype names
//! contain spaces ("Vehicle Data", "Custom Field").

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde_json::{Value, json};

use crate::config::Config;

use super::store::DocStore;

pub struct FrappeClient {
    http: Client,
    base_url: String,
    auth_header: String,
}

impl FrappeClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.site_url.trim_end_matches('/').to_string(),
            auth_header: format!("token {}:{}", config.api_key, config.api_secret),
        }
    }

    fn resource_url(&self, doctype: &str) -> String {
        format!(
            "{}/api/resource/{}",
            self.base_url,
            urlencoding::encode(doctype)
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let resp = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .with_context(|| format!("Request failed: GET {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("GET {} returned {}", url, status);
        }

        resp.json()
            .await
            .with_context(|| format!("Invalid JSON from GET {}", url))
    }
}

#[async_trait]
impl DocStore for FrappeClient {
    async fn exists(&self, doctype: &str, field: &str, value: &str) -> Result<bool> {
        let filters = json!([[field, "=", value]]).to_string();
        let url = format!(
            "{}?filters={}&limit_page_length=1",
            self.resource_url(doctype),
            urlencoding::encode(&filters)
        );

        let body = self.get_json(&url).await?;
        let found = body
            .get("data")
            .and_then(Value::as_array)
            .is_some_and(|rows| !rows.is_empty());
        Ok(found)
    }

    async fn insert(&self, doctype: &str, doc: Value) -> Result<()> {
        let url = self.resource_url(doctype);
        let resp = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, &self.auth_header)
            .json(&doc)
            .send()
            .await
            .with_context(|| format!("Request failed: POST {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("{} insert rejected ({}): {}", doctype, status, body);
        }
        Ok(())
    }

    async fn list_all(&self, doctype: &str) -> Result<Vec<Value>> {
        // limit_page_length=0 disables Frappe's default 20-row page
        let url = format!(
            "{}?fields={}&limit_page_length=0",
            self.resource_url(doctype),
            urlencoding::encode("[\"*\"]")
        );

        let body = self.get_json(&url).await?;
        match body.get("data") {
            Some(Value::Array(rows)) => Ok(rows.clone()),
            _ => bail!("Unexpected response listing {}: missing data array", doctype),
        }
    }

    async fn get_value(&self, doctype: &str, name: &str, field: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/{}",
            self.resource_url(doctype),
            urlencoding::encode(name)
        );

        let resp = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .with_context(|| format!("Request failed: GET {}", url))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = resp.status();
        if !status.is_success() {
            bail!("GET {} returned {}", url, status);
        }

        let body: Value = resp
            .json()
            .await
            .with_context(|| format!("Invalid JSON from GET {}", url))?;
        Ok(body
            .get("data")
            .and_then(|doc| doc.get(field))
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}
