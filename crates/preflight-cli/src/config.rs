//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the values it needs
//! (region catalog, lookup timeout).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PREFLIGHT__LOOKUP__TIMEOUT_SECS=30`
//! 3. Config file: `--config FILE`, else `./.preflight.toml`, else the
//!    platform config directory
//! 4. Built-in defaults (always present)

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use preflight_core::domain::RegionCatalog;

use crate::error::{CliError, CliResult};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".preflight.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cloud lookup settings.
    pub lookup: LookupConfig,
    /// Region short name to display name. Empty means the built-in VPC
    /// region list.
    #[serde(default)]
    pub regions: BTreeMap<String, String>,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lookup: LookupConfig { timeout_secs: 60 },
            regions: BTreeMap::new(),
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// `config_file` is the path given with `--config`; it must exist. The
    /// default locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("PREFLIGHT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)
    }

    /// Path of the configuration file used when `--config` is not given.
    ///
    /// `./.preflight.toml` wins if it exists; otherwise the platform config
    /// directory from `directories::ProjectDirs`.
    pub fn config_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        Self::global_config_path()
    }

    /// `config.toml` in the platform config directory.
    pub fn global_config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "preflight", "preflight")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Regions install configs may use.
    pub fn region_catalog(&self) -> RegionCatalog {
        if self.regions.is_empty() {
            RegionCatalog::ibm_vpc_default()
        } else {
            RegionCatalog::from_pairs(self.regions.clone())
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup.timeout_secs)
    }

    /// Render as TOML, as written by `preflight init`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Whether a file exists where configuration would be read from.
    pub fn exists_at(path: &Path) -> bool {
        path.is_file()
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
