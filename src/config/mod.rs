//! Configuration
//!
//! Layered application configuration: serde defaults, then the global and
//! local config files, then `PRODUCT_STORE__*` environment variables.

mod loader;
pub mod sources;

use crate::logging::LoggingConfig;
use crate::product::IdPolicy;
use crate::store::StoreOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loader::ConfigLoader;

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = "product-store.toml";

fn default_data_file() -> PathBuf {
    PathBuf::from("products.json")
}

fn default_true() -> bool {
    true
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON array file
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Id assignment policy: sequential or random
    #[serde(default)]
    pub id_policy: IdPolicy,

    /// Require title, description, price, thumbnail, code and stock on add
    #[serde(default = "default_true")]
    pub validate_on_add: bool,
}

impl StoreConfig {
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            id_policy: self.id_policy,
            validate_on_add: self.validate_on_add,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            id_policy: IdPolicy::default(),
            validate_on_add: default_true(),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Render as TOML for display.
    pub fn to_toml(&self) -> Result<String, crate::error::ApiError> {
        toml::to_string_pretty(self).map_err(|e| {
            crate::error::ApiError::ConfigError(format!("Failed to serialize config: {}", e))
        })
    }
}
