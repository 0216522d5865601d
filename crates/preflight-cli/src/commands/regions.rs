//! `preflight regions`: list the regions install configs may use.

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let regions = config.region_catalog();

    if output.is_json() {
        output.json(&regions)?;
        return Ok(());
    }

    output.header("Supported regions:")?;
    for line in regions.describe() {
        output.print(&format!("  {line}"))?;
    }
    Ok(())
}
