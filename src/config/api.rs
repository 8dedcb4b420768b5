//! Backend API configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration::parse_duration;

/// Default request timeout when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the storefront backend API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. "https://api.shop.example".
    pub base_url: String,
    /// Request timeout as a duration string (e.g. "10s", "500ms").
    pub timeout: Option<String>,
    /// Bearer token (loaded from the STOREFRONT_API_TOKEN environment
    /// variable, never from the file).
    #[serde(skip)]
    pub token: Option<String>,
}

impl ApiConfig {
    /// Parsed request timeout, defaulting when unset.
    pub fn timeout_duration(&self) -> Result<Duration, String> {
        match self.timeout.as_deref() {
            Some(raw) => parse_duration(raw),
            None => Ok(DEFAULT_TIMEOUT),
        }
    }
}
