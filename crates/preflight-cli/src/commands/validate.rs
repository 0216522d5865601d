//! Implementation of the `preflight validate` command.
//!
//! Responsibility: read the install config, pick the checks to run, and
//! print the report. All checking happens in `preflight-core`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use preflight_adapters::SnapshotLoader;
use preflight_core::{
    application::ValidationService,
    domain::{DomainError, DomainValidator, FieldError, FieldErrors, FieldPath},
    error::PreflightError,
};

use crate::{
    cli::ValidateArgs,
    commands::load_install_config,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Machine-readable report for `--output-format json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    install_config: &'a Path,
    valid: bool,
    offline: bool,
    errors: Vec<&'a FieldError>,
    checked_at: DateTime<Utc>,
}

/// Execute the `preflight validate` command.
///
/// 1. Read the install config
/// 2. Run the checks that need no cloud access
/// 3. If those pass and `--offline` is not set, load the snapshots and run
///    the full cross-validation
/// 4. Print every defect; fail with exit code 2 if there was any
#[instrument(skip_all, fields(install_config = %args.install_config.display()))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let install = load_install_config(&args.install_config)?;
    let platform = install
        .ibmcloud()
        .ok_or_else(|| PreflightError::Configuration {
            message: DomainError::MissingPlatform {
                platform: "ibmcloud",
            }
            .to_string(),
        })?;

    let regions = config.region_catalog();
    let mut errs = DomainValidator::validate_platform_fields(
        &regions,
        platform,
        &FieldPath::new("platform").child("ibmcloud"),
    );
    debug!(errors = errs.len(), "Offline checks finished");

    // Cloud checks repeat the offline ones, so they only run on a clean
    // platform section to keep each defect reported once.
    if errs.is_empty() && !args.offline {
        let cloud = SnapshotLoader::new(&args.cloud).load()?;
        let service = ValidationService::new(Box::new(cloud), regions)
            .with_timeout(config.lookup_timeout());
        let ctx = service.context();

        info!(snapshots = args.cloud.len(), "Cross-validating against cloud");
        errs = service.check(&ctx, &install)?;
    }

    print_report(&output, &args, &errs)?;

    if errs.is_empty() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed { count: errs.len() })
    }
}

fn print_report(output: &OutputManager, args: &ValidateArgs, errs: &FieldErrors) -> CliResult<()> {
    if output.is_json() {
        output.json(&Report {
            install_config: &args.install_config,
            valid: errs.is_empty(),
            offline: args.offline,
            errors: errs.iter().collect(),
            checked_at: Utc::now(),
        })?;
        return Ok(());
    }

    let name = args.install_config.display();
    if errs.is_empty() {
        if args.offline {
            output.success(&format!("{name}: offline checks passed"))?;
        } else {
            output.success(&format!("{name} is valid"))?;
        }
        return Ok(());
    }

    output.header(&format!("{name}: {} problem(s) found", errs.len()))?;
    for err in errs {
        output.error(&err.to_string())?;
    }
    if args.offline {
        output.warning("Cloud checks were skipped (--offline)")?;
    }

    Ok(())
}
