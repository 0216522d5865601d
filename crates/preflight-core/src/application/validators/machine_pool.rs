//! Checks applied to one machine pool fragment.

use super::{classify, region_zones, zone_list};
use crate::application::{LookupContext, ports::CloudApi};
use crate::domain::{FieldError, FieldErrors, FieldPath, IbmCloudMachinePool};

/// Run the type, zone and boot-volume checks for the fields that are set.
///
/// Unset fields are skipped, not defaulted. `path` is the pool's
/// `platform.ibmcloud` section.
pub fn validate_machine_pool(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    region: &str,
    pool: &IbmCloudMachinePool,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();

    if let Some(instance_type) = pool.instance_type() {
        errs.append(validate_machine_type(cloud, ctx, instance_type, path));
    }

    if !pool.zones.is_empty() {
        errs.append(validate_machine_pool_zones(
            cloud,
            ctx,
            region,
            &pool.zones,
            path,
        ));
    }

    if let Some(key) = pool.encryption_key() {
        errs.append(validate_boot_volume_key(cloud, ctx, key, path));
    }

    errs
}

/// The instance type must appear in the profile catalog.
pub fn validate_machine_type(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    instance_type: &str,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();
    let type_path = path.child("type");

    match ctx.run("instance_profiles", || cloud.instance_profiles(ctx)) {
        Err(err) => errs.push(FieldError::internal(type_path, &err)),
        Ok(profiles) => {
            if !profiles.iter().any(|p| p.name == instance_type) {
                errs.push(FieldError::not_found(type_path, instance_type));
            }
        }
    }

    errs
}

/// Every declared zone must belong to `region`.
pub fn validate_machine_pool_zones(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    region: &str,
    zones: &[String],
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();
    let zones_path = path.child("zones");

    match region_zones(cloud, ctx, region) {
        Err(err) => errs.push(FieldError::internal(zones_path, &err)),
        Ok(valid_zones) => {
            for zone in zones.iter().filter(|z| !valid_zones.contains(*z)) {
                errs.push(FieldError::invalid(
                    zones_path.clone(),
                    zone,
                    format!("zone is not in expected zones: {}", zone_list(&valid_zones)),
                ));
            }
        }
    }

    errs
}

/// The boot volume encryption key must exist.
pub fn validate_boot_volume_key(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    key: &str,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();

    if let Err(err) = ctx.run("encryption_key", || cloud.encryption_key(ctx, key)) {
        errs.push(classify(
            path.child("bootVolume").child("encryptionKey"),
            key,
            &err,
        ));
    }

    errs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::validators::testing::StubCloud;
    use crate::domain::{BootVolume, FieldErrorKind};

    fn pool(instance_type: Option<&str>, zones: &[&str], key: Option<&str>) -> IbmCloudMachinePool {
        IbmCloudMachinePool {
            instance_type: instance_type.map(str::to_owned),
            zones: zones.iter().map(|z| z.to_string()).collect(),
            boot_volume: key.map(|k| BootVolume {
                encryption_key: Some(k.to_owned()),
            }),
        }
    }

    fn run(cloud: &StubCloud, pool: &IbmCloudMachinePool) -> FieldErrors {
        validate_machine_pool(cloud, &LookupContext::new(), "us-south", pool, &FieldPath::new("pool"))
    }

    #[test]
    fn empty_pool_makes_no_lookups() {
        let cloud = StubCloud::populated()
            .failing("instance_profiles")
            .failing("vpc_zones")
            .failing("encryption_key");
        assert!(run(&cloud, &IbmCloudMachinePool::default()).is_empty());
    }

    #[test]
    fn fully_valid_pool_passes() {
        let p = pool(Some("bx2-4x16"), &["us-south-1", "us-south-3"], Some("key-id"));
        assert!(run(&StubCloud::populated(), &p).is_empty());
    }

    #[test]
    fn unknown_type_is_not_found() {
        let errs = run(&StubCloud::populated(), &pool(Some("bx2-1x1"), &[], None));
        assert_eq!(
            errs.iter().next().unwrap().to_string(),
            r#"pool.type: Not found: "bx2-1x1""#
        );
    }

    #[test]
    fn catalog_failure_is_internal() {
        let cloud = StubCloud::populated().failing("instance_profiles");
        let errs = run(&cloud, &pool(Some("bx2-4x16"), &[], None));
        assert_eq!(errs.iter().next().unwrap().kind, FieldErrorKind::InternalError);
    }

    #[test]
    fn each_foreign_zone_is_invalid() {
        let errs = run(&StubCloud::populated(), &pool(None, &["us-south-1", "eu-de-1", "eu-de-2"], None));
        let values: Vec<&str> = errs.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["eu-de-1", "eu-de-2"]);
        assert!(errs.iter().all(|e| e.kind == FieldErrorKind::Invalid
            && e.detail == "zone is not in expected zones: [us-south-1 us-south-2 us-south-3]"));
    }

    #[test]
    fn missing_key_is_not_found_and_failure_is_internal() {
        let errs = run(&StubCloud::populated(), &pool(None, &[], Some("key-404")));
        let err = errs.iter().next().unwrap();
        assert_eq!(err.kind, FieldErrorKind::NotFound);
        assert_eq!(err.path.to_string(), "pool.bootVolume.encryptionKey");

        let cloud = StubCloud::populated().failing("encryption_key");
        let errs = run(&cloud, &pool(None, &[], Some("key-id")));
        assert_eq!(errs.iter().next().unwrap().kind, FieldErrorKind::InternalError);
    }
}
