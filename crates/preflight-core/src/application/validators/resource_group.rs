use crate::application::{LookupContext, ports::CloudApi};
use crate::domain::{FieldError, FieldErrors, FieldPath};

/// The configured resource group must match one listed group by exact ID or
/// exact name. Only call this when a group is configured.
pub fn validate_resource_group(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    resource_group: &str,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();
    let group_path = path.child("resourceGroup");

    match ctx.run("resource_groups", || cloud.resource_groups(ctx)) {
        Err(err) => errs.push(FieldError::internal(group_path, &err)),
        Ok(groups) => {
            if !groups.iter().any(|g| g.matches(resource_group)) {
                errs.push(FieldError::not_found(group_path, resource_group));
            }
        }
    }

    errs
}
