//! Client state storage configuration.

use serde::Deserialize;

/// Persistent client state settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Whether client state persists across runs.
    #[serde(default)]
    pub enabled: bool,
    /// Path to the SQLite database file.
    pub path: Option<String>,
}
