//! `preflight init`: write a default configuration file.

use std::{fs, path::PathBuf};

use tracing::info;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Target precedence: `--config FILE`, then `--local`, then the platform
/// config directory.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, &global);

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default().to_toml()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    fs::write(&config_path, toml).with_cli_context(|| {
        format!("Failed to write config to '{}'", config_path.display())
    })?;

    info!(path = %config_path.display(), "Wrote default configuration");
    output.success(&format!(
        "Configuration created at {}",
        config_path.display()
    ))?;

    Ok(())
}

fn target_path(args: &InitArgs, global: &GlobalArgs) -> PathBuf {
    if let Some(path) = &global.config {
        path.clone()
    } else if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::global_config_path()
    }
}
