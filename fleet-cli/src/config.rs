//! Connection settings for the target ERPNext site
//!
//! Read from the environment so the tool can run unattended; a local
//! `.env` file is honored by the entry point before settings load.

use anyhow::{Context, Result};

const ENV_SITE_URL: &str = "ERPNEXT_URL";
const ENV_API_KEY: &str = "ERPNEXT_API_KEY";
const ENV_API_SECRET: &str = "ERPNEXT_API_SECRET";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the site, e.g. `https://erp.example.com`.
    pub site_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            site_url: require(ENV_SITE_URL)?,
            api_key: require(ENV_API_KEY)?,
            api_secret: require(ENV_API_SECRET)?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} is not set", name))
}
