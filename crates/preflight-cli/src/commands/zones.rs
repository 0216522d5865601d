//! `preflight zones`: list the DNS zones an account can use as base domain.

use tracing::{info, instrument};

use preflight_adapters::SnapshotLoader;
use preflight_core::application::ValidationService;

use crate::{cli::ZonesArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(snapshots = args.cloud.len()))]
pub fn execute(args: ZonesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cloud = SnapshotLoader::new(&args.cloud).load()?;
    let service = ValidationService::new(Box::new(cloud), config.region_catalog())
        .with_timeout(config.lookup_timeout());

    let zones = service.dns_zones()?;
    info!(count = zones.len(), "Listing DNS zones");

    if output.is_json() {
        output.json(&zones)?;
        return Ok(());
    }

    if zones.is_empty() {
        output.warning("No DNS zones found")?;
        return Ok(());
    }

    output.header("DNS zones:")?;
    for zone in &zones {
        output.print(&format!("  {} ({})", zone.name, zone.cis_instance_name))?;
    }
    Ok(())
}
