//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.roost.example/api";

/// Root configuration loaded from `config.toml`.
///
/// Every field has a default so a partial (or missing) file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without trailing slash.
    pub api_base_url: String,

    /// Overrides where `storage.json` and the logs live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,

    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: None,
            log_level: "info".to_string(),
            request_timeout_secs: 30,
        }
    }
}
