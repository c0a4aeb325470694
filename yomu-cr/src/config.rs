//! Configuration resolution for yomu-cr
//!
//! Each setting resolves with CLI → ENV → TOML → default priority, using
//! the shared helpers from `yomu_common::config`.

use std::fmt::Display;
use std::str::FromStr;

use yomu_common::config::{resolve_setting, TomlConfig};
use yomu_common::{Error, Result};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.comick.io";
pub const DEFAULT_CATALOG_LANG: &str = "en";
pub const DEFAULT_PORT: u16 = 5741;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEARCH_PAGE_LIMIT: usize = 5;

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Base URL of the external comic catalog API
    pub catalog_base_url: String,
    /// Preferred chapter language code
    pub catalog_lang: String,
    /// Listen port for the HTTP surface
    pub port: u16,
    /// Per-request catalog timeout
    pub request_timeout_secs: u64,
    /// Search hits inspected per title candidate
    pub search_page_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            catalog_lang: DEFAULT_CATALOG_LANG.to_string(),
            port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            search_page_limit: DEFAULT_SEARCH_PAGE_LIMIT,
        }
    }
}

impl ResolverConfig {
    /// Resolve the full configuration from CLI overrides and the TOML file
    pub fn resolve(
        cli_base_url: Option<&str>,
        cli_lang: Option<&str>,
        cli_port: Option<u16>,
        toml_config: &TomlConfig,
    ) -> Result<Self> {
        let catalog_base_url = resolve_setting(
            cli_base_url,
            "YOMU_CATALOG_BASE_URL",
            toml_config.catalog_base_url.as_deref(),
            DEFAULT_CATALOG_BASE_URL,
        );

        if catalog_base_url.trim().is_empty() {
            return Err(Error::Config("Catalog base URL must not be empty".into()));
        }

        let catalog_lang = resolve_setting(
            cli_lang,
            "YOMU_CATALOG_LANG",
            toml_config.catalog_lang.as_deref(),
            DEFAULT_CATALOG_LANG,
        );

        let port = match cli_port {
            Some(port) => port,
            None => resolve_numeric("YOMU_CR_PORT", toml_config.resolver_port, DEFAULT_PORT)?,
        };

        let request_timeout_secs = resolve_numeric(
            "YOMU_CATALOG_TIMEOUT_SECS",
            toml_config.request_timeout_secs,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let search_page_limit = resolve_numeric(
            "YOMU_SEARCH_PAGE_LIMIT",
            toml_config.search_page_limit,
            DEFAULT_SEARCH_PAGE_LIMIT,
        )?;

        Ok(Self {
            catalog_base_url,
            catalog_lang,
            port,
            request_timeout_secs,
            search_page_limit,
        })
    }
}

/// ENV → TOML → default resolution for a numeric setting
fn resolve_numeric<T>(env_var_name: &str, toml_value: Option<T>, default: T) -> Result<T>
where
    T: FromStr + Copy,
    T::Err: Display,
{
    if let Ok(raw) = std::env::var(env_var_name) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed
                .parse()
                .map_err(|e| Error::Config(format!("Invalid {}: {}", env_var_name, e)));
        }
    }

    Ok(toml_value.unwrap_or(default))
}
