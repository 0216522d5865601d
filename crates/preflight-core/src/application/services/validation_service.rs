//! Validation Service - main application orchestrator.
//!
//! This service runs the whole cross-validation of one install config:
//! 1. Validate the platform section (region, DNS, image, networking, ...)
//! 2. Validate the control plane pool
//! 3. Validate every compute pool
//!
//! Each step appends to one accumulator; nothing stops the run early.

use std::time::Duration;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        CloudApi, DEFAULT_LOOKUP_TIMEOUT, LookupContext,
        validators::{validate_machine_pool, validate_platform},
    },
    domain::{DnsZone, DomainError, FieldErrors, FieldPath, InstallConfig, RegionCatalog},
    error::{PreflightError, PreflightResult},
};

/// Main validation service.
///
/// Holds the cloud port and the region catalog; both are fixed for the
/// lifetime of the service and shared by every run.
pub struct ValidationService {
    cloud: Box<dyn CloudApi>,
    regions: RegionCatalog,
    timeout: Duration,
}

impl ValidationService {
    /// Create a new validation service.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use preflight_core::prelude::*;
    ///
    /// # fn build(cloud: Box<dyn CloudApi>) -> ValidationService {
    /// ValidationService::new(cloud, RegionCatalog::ibm_vpc_default())
    /// # }
    /// ```
    pub fn new(cloud: Box<dyn CloudApi>, regions: RegionCatalog) -> Self {
        Self {
            cloud,
            regions,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Bound each lookup of runs started from [`context`](Self::context).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A fresh lookup context carrying this service's timeout.
    pub fn context(&self) -> LookupContext {
        LookupContext::new().with_timeout(self.timeout)
    }

    pub fn regions(&self) -> &RegionCatalog {
        &self.regions
    }

    /// Validate an install config with a fresh lookup context.
    pub fn validate(&self, config: &InstallConfig) -> PreflightResult<()> {
        let ctx = self.context();
        self.validate_with(&ctx, config)
    }

    /// Validate an install config under a caller-supplied context.
    ///
    /// Returns `PreflightError::Validation` carrying every defect found, or
    /// `PreflightError::Configuration` if there is no IBM Cloud section.
    pub fn validate_with(&self, ctx: &LookupContext, config: &InstallConfig) -> PreflightResult<()> {
        match self.check(ctx, config)?.into_aggregate() {
            None => Ok(()),
            Some(report) => Err(report.into()),
        }
    }

    /// Run every check and return the raw accumulator.
    #[instrument(
        skip_all,
        fields(
            run_id = %Uuid::new_v4(),
            base_domain = %config.base_domain,
            region = tracing::field::Empty,
        )
    )]
    pub fn check(&self, ctx: &LookupContext, config: &InstallConfig) -> PreflightResult<FieldErrors> {
        let platform = config.ibmcloud().ok_or_else(|| PreflightError::Configuration {
            message: DomainError::MissingPlatform {
                platform: "ibmcloud",
            }
            .to_string(),
        })?;
        tracing::Span::current().record("region", platform.region.as_str());
        info!("Validating install config");

        let cloud = self.cloud.as_ref();
        let mut errs = validate_platform(
            cloud,
            ctx,
            &self.regions,
            &config.base_domain,
            platform,
            &FieldPath::new("platform").child("ibmcloud"),
        );

        if let Some(pool) = config
            .control_plane
            .as_ref()
            .and_then(|cp| cp.platform.ibmcloud.as_ref())
        {
            debug!("validating control plane pool");
            errs.append(validate_machine_pool(
                cloud,
                ctx,
                &platform.region,
                pool,
                &FieldPath::new("controlPlane")
                    .child("platform")
                    .child("ibmcloud"),
            ));
        }

        for (i, compute) in config.compute.iter().enumerate() {
            let Some(pool) = compute.platform.ibmcloud.as_ref() else {
                continue;
            };
            debug!(index = i, name = %compute.name, "validating compute pool");
            errs.append(validate_machine_pool(
                cloud,
                ctx,
                &platform.region,
                pool,
                &FieldPath::new("compute")
                    .index(i)
                    .child("platform")
                    .child("ibmcloud"),
            ));
        }

        info!(errors = errs.len(), "Validation finished");
        Ok(errs)
    }

    /// Every public DNS zone the account can see, sorted by name.
    #[instrument(skip_all)]
    pub fn dns_zones(&self) -> PreflightResult<Vec<DnsZone>> {
        let ctx = self.context();
        let mut zones = ctx.run("dns_zones", || self.cloud.dns_zones(&ctx))?;
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        info!(count = zones.len(), "Listed DNS zones");
        Ok(zones)
    }
}
