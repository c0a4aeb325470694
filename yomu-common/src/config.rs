//! Configuration loading and setting resolution
//!
//! Settings follow the same priority order in every yomu service:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of the optional `config.toml` shared by yomu services.
///
/// Every field is optional; absent keys fall through to environment
/// variables and compiled defaults during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Base URL of the external comic catalog API
    pub catalog_base_url: Option<String>,
    /// Preferred chapter language code (e.g. "en")
    pub catalog_lang: Option<String>,
    /// Listen port for the catalog resolver service
    pub resolver_port: Option<u16>,
    /// Per-request catalog timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Maximum number of search hits inspected per title
    pub search_page_limit: Option<usize>,
}

impl TomlConfig {
    /// Load the config file, if one can be found.
    ///
    /// An explicit path is used as-is and must exist; without one, the
    /// platform config directory is probed (`~/.config/yomu/config.toml`
    /// on Linux). A missing implicit file is not an error; services run
    /// fine on environment variables and defaults alone.
    pub fn load(explicit: Option<&Path>) -> Result<TomlConfig> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(TomlConfig::default()),
            },
        };

        let content = std::fs::read_to_string(&path)?;
        let config: TomlConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Loaded TOML config");
        Ok(config)
    }
}

/// Default configuration file path for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("yomu").join("config.toml"))
}

/// Resolve one string setting with CLI → ENV → TOML → default priority
pub fn resolve_setting(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
    default: &str,
) -> String {
    if let Some(value) = cli_arg {
        return value.to_string();
    }

    if let Ok(value) = std::env::var(env_var_name) {
        if !value.trim().is_empty() {
            return value;
        }
    }

    if let Some(value) = toml_value {
        return value.to_string();
    }

    default.to_string()
}
