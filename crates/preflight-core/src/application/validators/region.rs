use crate::domain::{DomainValidator, FieldErrors, FieldPath, RegionCatalog};

/// Region membership in the injected catalog. `path` is the platform section.
pub fn validate_region(regions: &RegionCatalog, region: &str, path: &FieldPath) -> FieldErrors {
    DomainValidator::validate_region(regions, region, &path.child("region"))
}
