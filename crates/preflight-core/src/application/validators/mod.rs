//! Cross-validation of install-config fields against the cloud.
//!
//! Each atomic validator is a free function of the cloud port, the lookup
//! context, the value(s) it checks and the path of the enclosing section.
//! None of them depends on another's outcome, and none of them returns
//! early out of the run: every lookup failure is turned into a
//! [`FieldError`] on the spot.

pub mod dns;
pub mod image;
pub mod machine_pool;
pub mod network;
pub mod platform;
pub mod region;
pub mod resource_group;

#[cfg(test)]
pub(crate) mod testing;

pub use dns::validate_cis_instance_crn;
pub use image::validate_cluster_os_image;
pub use machine_pool::{
    validate_boot_volume_key, validate_machine_pool, validate_machine_pool_zones,
    validate_machine_type,
};
pub use network::{validate_networking, validate_subnet_zone, validate_subnets};
pub use platform::validate_platform;
pub use region::validate_region;
pub use resource_group::validate_resource_group;

use crate::application::{LookupContext, LookupError, LookupResult, ports::CloudApi};
use crate::domain::{FieldError, FieldPath};

/// Zones of `region`, sorted so reports list them in a stable order.
fn region_zones(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    region: &str,
) -> LookupResult<Vec<String>> {
    let mut zones = ctx.run("vpc_zones", || cloud.vpc_zones(ctx, region))?;
    zones.sort();
    Ok(zones)
}

/// `[a b c]`
fn zone_list(zones: &[String]) -> String {
    format!("[{}]", zones.join(" "))
}

/// `NotFound` for a missing resource, `InternalError` for anything else.
fn classify(path: FieldPath, value: &str, err: &LookupError) -> FieldError {
    if err.is_not_found() {
        FieldError::not_found(path, value)
    } else {
        FieldError::internal(path, err)
    }
}
