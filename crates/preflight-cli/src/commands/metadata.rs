//! `preflight metadata`: print what teardown tooling needs to know.

use tracing::instrument;

use preflight_core::{
    domain::{ClusterMetadata, DomainError},
    error::PreflightError,
};

use crate::{cli::MetadataArgs, commands::load_install_config, error::CliResult, output::OutputManager};

/// Always JSON, whatever the output format; the result is meant for tools.
#[instrument(skip_all, fields(install_config = %args.install_config.display()))]
pub fn execute(args: MetadataArgs, output: OutputManager) -> CliResult<()> {
    let install = load_install_config(&args.install_config)?;

    let metadata = ClusterMetadata::from_install_config(&install).ok_or_else(|| {
        PreflightError::Configuration {
            message: DomainError::MissingPlatform {
                platform: "ibmcloud",
            }
            .to_string(),
        }
    })?;

    output.json(&metadata)?;
    Ok(())
}
