//! Configuration sources: global file, local file and environment overlay.

use super::LOCAL_CONFIG_FILE;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat, Source};
use std::path::{Path, PathBuf};

/// Environment prefix for configuration keys.
pub const ENV_PREFIX: &str = "PRODUCT_STORE";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// `$XDG_CONFIG_HOME/product-store/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|dir| dir.join("product-store").join("config.toml"))
}

/// Add the global config file, if present.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Some(path) => Ok(builder.add_source(toml_file(&path, false))),
        None => Ok(builder),
    }
}

/// Add `product-store.toml` from the working directory, if present.
pub fn add_local_file(
    builder: ConfigBuilder<DefaultState>,
    working_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = working_dir.join(LOCAL_CONFIG_FILE);
    Ok(builder.add_source(toml_file(&path, false)))
}

/// Add environment variable overlay to builder.
/// Uses PRODUCT_STORE prefix and __ as separator for nested keys.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}

/// TOML file source at `path`.
pub(crate) fn toml_file(path: &Path, required: bool) -> impl Source + Send + Sync + 'static {
    File::from(path.to_path_buf())
        .format(FileFormat::Toml)
        .required(required)
}
