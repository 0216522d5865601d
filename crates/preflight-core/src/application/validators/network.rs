//! Bring-your-own VPC and subnets.

use tracing::debug;

use super::{classify, region_zones, zone_list};
use crate::application::{LookupContext, ports::CloudApi};
use crate::domain::{FieldError, FieldErrors, FieldPath, IbmCloudPlatform};

/// Resolve the VPC (when named) and validate every subnet (when listed).
///
/// The two halves are independent: subnets are checked whatever happened to
/// the VPC, so one pass shows both classes of defect. The all-or-nothing
/// rule for `vpc`/`subnets` is a static check done by the caller.
pub fn validate_networking(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    platform: &IbmCloudPlatform,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();

    if let Some(vpc) = platform.vpc() {
        errs.append(validate_vpc(cloud, ctx, platform, vpc, path));
    }

    if !platform.subnets.is_empty() {
        errs.append(validate_subnets(
            cloud,
            ctx,
            &platform.region,
            &platform.subnets,
            path,
        ));
    }

    errs
}

fn validate_vpc(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    platform: &IbmCloudPlatform,
    vpc: &str,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();

    // An explicit VPC resource group must resolve before it can scope the
    // VPC lookup.
    let scope = match platform.vpc_resource_group() {
        Some(group) => match ctx.run("resource_group", || cloud.resource_group(ctx, group)) {
            Ok(resolved) => Some(resolved.id),
            Err(err) => {
                errs.push(classify(path.child("vpcResourceGroup"), group, &err));
                return errs;
            }
        },
        None => platform.resource_group().map(str::to_owned),
    };

    debug!(vpc, resource_group = ?scope, "resolving VPC");
    if let Err(err) = ctx.run("vpc", || cloud.vpc(ctx, vpc, scope.as_deref())) {
        errs.push(classify(path.child("vpc"), vpc, &err));
    }

    errs
}

/// Every subnet must resolve and sit in one of the region's zones.
///
/// The zone list is fetched once. If that fails, subnets are still resolved
/// but zone membership is not tested.
pub fn validate_subnets(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    region: &str,
    subnets: &[String],
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();

    let valid_zones = match region_zones(cloud, ctx, region) {
        Ok(zones) => Some(zones),
        Err(err) => {
            errs.push(FieldError::internal(path.child("subnets"), &err));
            None
        }
    };

    for subnet in subnets {
        errs.append(validate_subnet_zone(
            cloud,
            ctx,
            subnet,
            valid_zones.as_deref(),
            path,
        ));
    }

    errs
}

/// Resolve one subnet and, when `valid_zones` is known, test its zone.
pub fn validate_subnet_zone(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    subnet_id: &str,
    valid_zones: Option<&[String]>,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();
    let subnets_path = path.child("subnets");

    match ctx.run("subnet", || cloud.subnet(ctx, subnet_id)) {
        Err(err) => errs.push(classify(subnets_path, subnet_id, &err)),
        Ok(subnet) => {
            if let Some(zones) = valid_zones {
                if !zones.contains(&subnet.zone) {
                    errs.push(FieldError::invalid(
                        subnets_path,
                        subnet_id,
                        format!("subnet is not in expected zones: {}", zone_list(zones)),
                    ));
                }
            }
        }
    }

    errs
}
