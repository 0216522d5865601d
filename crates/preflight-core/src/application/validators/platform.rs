use tracing::debug;

use super::{
    validate_cis_instance_crn, validate_cluster_os_image, validate_machine_pool,
    validate_networking, validate_region, validate_resource_group,
};
use crate::application::{LookupContext, ports::CloudApi};
use crate::domain::{DomainValidator, FieldErrors, FieldPath, IbmCloudPlatform, RegionCatalog};

/// Cross-validate the platform section. `path` is `platform.ibmcloud`.
///
/// Region, CIS instance and cluster OS image are always checked. The
/// resource group, networking and default machine pool only when they are
/// configured. Every check runs regardless of the others' outcome.
pub fn validate_platform(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    regions: &RegionCatalog,
    base_domain: &str,
    platform: &IbmCloudPlatform,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();

    errs.append(validate_region(regions, &platform.region, path));
    errs.append(validate_cis_instance_crn(
        cloud,
        ctx,
        base_domain,
        &platform.cis_instance_crn,
        path,
    ));
    errs.append(validate_cluster_os_image(
        cloud,
        ctx,
        &platform.cluster_os_image,
        &platform.region,
        path,
    ));

    if let Some(group) = platform.resource_group() {
        errs.append(validate_resource_group(cloud, ctx, group, path));
    }

    if platform.has_network_config() {
        errs.append(DomainValidator::validate_vpc_config(platform, path));
        errs.append(validate_networking(cloud, ctx, platform, path));
    }

    if let Some(pool) = &platform.default_machine_platform {
        debug!("validating default machine platform");
        errs.append(validate_machine_pool(
            cloud,
            ctx,
            &platform.region,
            pool,
            &path.child("defaultMachinePlatform"),
        ));
    }

    errs
}
