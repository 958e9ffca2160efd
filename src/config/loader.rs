//! ConfigLoader: composes sources and deserializes to AppConfig.

use super::{sources, AppConfig};
use config::{Config, ConfigError};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from standard sources.
    /// Precedence: global file (lowest) -> local file -> environment (highest).
    pub fn load(working_dir: &Path) -> Result<AppConfig, ConfigError> {
        let builder = Config::builder();
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_local_file(builder, working_dir)?;
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
        let builder = Config::builder().add_source(sources::toml_file(path, true));
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> AppConfig {
        AppConfig::default()
    }
}
