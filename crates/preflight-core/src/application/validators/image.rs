use tracing::warn;

use crate::application::{LookupContext, ports::CloudApi};
use crate::domain::{FieldError, FieldErrors, FieldPath};

/// The cluster OS image must exist in `region`.
///
/// A failed lookup is reported as `NotFound`, like a missing image: some
/// versions of the image listing API return an error for an empty result.
/// Only cancellation and timeouts become `InternalError`.
pub fn validate_cluster_os_image(
    cloud: &dyn CloudApi,
    ctx: &LookupContext,
    image: &str,
    region: &str,
    path: &FieldPath,
) -> FieldErrors {
    let mut errs = FieldErrors::new();
    let image_path = path.child("clusterOSImage");

    match ctx.run("custom_image_by_name", || {
        cloud.custom_image_by_name(ctx, image, region)
    }) {
        Ok(_) => {}
        Err(err) if err.is_interrupted() => errs.push(FieldError::internal(image_path, &err)),
        Err(err) => {
            if !err.is_not_found() {
                warn!(error = %err, image, region, "image lookup failed, reporting as not found");
            }
            errs.push(FieldError::not_found(image_path, image));
        }
    }

    errs
}
