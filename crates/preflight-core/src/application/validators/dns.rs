use tracing::debug;

use crate::application::{LookupContext, ports::CloudApi};
use crate::domain::{FieldError, FieldErrors, FieldPath};

/// The CIS instance must exist and own an active zone for `base_domain`.
///
/// The zone lookup is only attempted once the instance resolved; without an
/// instance there is nothing to scope it to.
pub fn validate_cis_instance_crn(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    base_domain: &str,
    crn: &str,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();
    let crn_path = path.child("cisInstanceCRN");

    match ctx.run("cis_instance", || cloud.cis_instance(ctx, crn)) {
        Err(err) if err.is_interrupted() => errs.push(FieldError::internal(crn_path, &err)),
        Err(err) => {
            debug!(error = %err, crn, "CIS instance did not resolve");
            errs.push(FieldError::not_found(crn_path, crn));
        }
        Ok(_) => match ctx.run("zone_id_by_name", || {
            cloud.zone_id_by_name(ctx, crn, base_domain)
        }) {
            Ok(id) if !id.is_empty() => {}
            Err(err) if err.is_interrupted() => errs.push(FieldError::internal(crn_path, &err)),
            _ => errs.push(FieldError::invalid(
                crn_path,
                crn,
                format!("the CIS instance has no active DNS zone for base domain {base_domain}"),
            )),
        },
    }

    errs
}
