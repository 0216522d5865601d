//! Command handlers, one module per subcommand.

pub mod config;
pub mod init;
pub mod metadata;
pub mod regions;
pub mod validate;
pub mod zones;

use std::{fs, path::Path};

use preflight_core::domain::InstallConfig;

use crate::error::{CliError, CliResult, IntoCli, reading};

/// Read an install config. `.json` and `.toml` are accepted.
pub(crate) fn load_install_config(path: &Path) -> CliResult<InstallConfig> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let is_json = match ext.as_deref() {
        Some("json") => true,
        Some("toml") => false,
        _ => {
            return Err(CliError::InvalidInput {
                message: format!("'{}' has no .json or .toml extension", path.display()),
                source: None,
            });
        }
    };

    let content = fs::read_to_string(path).with_cli_context(|| reading(path))?;

    let parsed: Result<InstallConfig, Box<dyn std::error::Error + Send + Sync>> = if is_json {
        serde_json::from_str(&content).map_err(Into::into)
    } else {
        toml::from_str(&content).map_err(Into::into)
    };

    parsed.map_err(|e| CliError::InvalidInput {
        message: format!("'{}' is not a valid install config", path.display()),
        source: Some(e),
    })
}
