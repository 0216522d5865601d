//! `preflight config`: inspect the effective configuration.

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&config.to_toml()?)?;
            }
        }

        ConfigCommands::Path => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            let note = if AppConfig::exists_at(&path) {
                ""
            } else {
                " (not created yet)"
            };
            output.print(&format!("{}{note}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "lookup.timeout_secs" => Ok(config.lookup.timeout_secs.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => {
            if let Some(region) = key.strip_prefix("regions.") {
                return config
                    .region_catalog()
                    .display_name(region)
                    .map(str::to_owned)
                    .map_err(|e| CliError::ConfigError {
                        message: e.to_string(),
                        source: Some(Box::new(e)),
                    });
            }
            Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
