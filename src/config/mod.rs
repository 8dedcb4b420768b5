//! Configuration loading and validation for the storefront client.
//!
//! Uses serde_yaml to load YAML configuration files with support for
//! environment variable overrides for sensitive credentials.

mod api;
mod app;
mod duration;
mod error;
mod pricing;
mod storage;

pub use api::ApiConfig;
pub use app::AppConfig;
pub use error::ConfigError;
pub use pricing::PricingConfig;
pub use storage::StorageConfig;

use rust_decimal::Decimal;
use serde::Deserialize;
use std::{env, fs};

/// Root configuration structure for the storefront client.
///
/// Required sections: app, api.
/// Optional sections: pricing, storage.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// Backend API endpoint and timeout.
    pub api: ApiConfig,
    /// VAT rate and price display settings (optional).
    pub pricing: Option<PricingConfig>,
    /// Client state persistence (optional).
    pub storage: Option<StorageConfig>,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// First loads environment variables from `.env` file (if exists),
    /// then loads YAML config and the bearer token from the environment:
    /// - `STOREFRONT_API_TOKEN`
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore error if not found)
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.load_credentials_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load credentials from environment variables.
    fn load_credentials_from_env(&mut self) {
        self.api.token = env::var("STOREFRONT_API_TOKEN").ok().filter(|t| !t.is_empty());
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "api.base_url must be an http(s) URL".into(),
            ));
        }

        self.api
            .timeout_duration()
            .map_err(|e| ConfigError::Validation(format!("api.timeout: {}", e)))?;

        if let Some(ref pricing) = self.pricing {
            if pricing.default_vat_rate < Decimal::ZERO {
                return Err(ConfigError::Validation(
                    "pricing.default_vat_rate must not be negative".into(),
                ));
            }

            if let Some(ref mode) = pricing.display_mode {
                if mode != "incl" && mode != "excl" {
                    return Err(ConfigError::Validation(format!(
                        "pricing.display_mode must be \"incl\" or \"excl\", got {}",
                        mode
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
