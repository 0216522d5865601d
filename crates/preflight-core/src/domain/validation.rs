use crate::domain::{
    entities::IbmCloudPlatform,
    field::{FieldError, FieldErrors, FieldPath},
    value_objects::{Crn, RegionCatalog},
};

const VPC_CONFIG_DETAIL: &str =
    "if either one of the vpc or subnets fields is defined, they both must be defined";

/// Centralized static validation.
///
/// Nothing here talks to the cloud. These checks only look at the shape of
/// the install config and the injected region catalog.
pub struct DomainValidator;

impl DomainValidator {
    /// `path` points at the region field itself.
    pub fn validate_region(regions: &RegionCatalog, region: &str, path: &FieldPath) -> FieldErrors {
        let mut errs = FieldErrors::new();
        if region.is_empty() {
            errs.push(FieldError::required(path.clone(), "region must be specified"));
        } else if !regions.contains(region) {
            errs.push(FieldError::not_supported(
                path.clone(),
                region,
                &regions.short_names(),
            ));
        }
        errs
    }

    /// `path` points at the CRN field itself.
    pub fn validate_crn(crn: &str, path: &FieldPath) -> FieldErrors {
        let mut errs = FieldErrors::new();
        if crn.is_empty() {
            errs.push(FieldError::required(
                path.clone(),
                "cisInstanceCRN must be specified",
            ));
        } else if crn.parse::<Crn>().is_err() {
            errs.push(FieldError::invalid(
                path.clone(),
                crn,
                "cisInstanceCRN is not a valid IBM CRN",
            ));
        }
        errs
    }

    /// `vpc` and `subnets` are all-or-nothing. Reports `Required` on
    /// whichever side is empty; `path` is the platform section.
    pub fn validate_vpc_config(platform: &IbmCloudPlatform, path: &FieldPath) -> FieldErrors {
        let mut errs = FieldErrors::new();
        if platform.has_network_config() {
            if platform.vpc().is_none() {
                errs.push(FieldError::required(path.child("vpc"), VPC_CONFIG_DETAIL));
            }
            if platform.subnets.is_empty() {
                errs.push(FieldError::required(path.child("subnets"), VPC_CONFIG_DETAIL));
            }
        }
        errs
    }

    /// Every static check of the platform section, without any lookups.
    pub fn validate_platform_fields(
        regions: &RegionCatalog,
        platform: &IbmCloudPlatform,
        path: &FieldPath,
    ) -> FieldErrors {
        let mut errs = FieldErrors::new();

        errs.append(Self::validate_region(
            regions,
            &platform.region,
            &path.child("region"),
        ));

        if platform.cluster_os_image.is_empty() {
            errs.push(FieldError::required(
                path.child("clusterOSImage"),
                "clusterOSImage must be specified",
            ));
        }

        errs.append(Self::validate_crn(
            &platform.cis_instance_crn,
            &path.child("cisInstanceCRN"),
        ));

        errs.append(Self::validate_vpc_config(platform, path));

        // Machine pool fields carry no static constraints yet; the default
        // pool is only checked against the cloud.
        errs
    }
}
