//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `preflight-adapters` crate provides implementations.

use crate::application::{LookupContext, LookupResult};
use crate::domain::{
    CustomImage, DnsInstance, DnsZone, EncryptionKey, InstanceProfile, ResourceGroup, Subnet, Vpc,
};

/// Port for read-only lookups against the IBM Cloud control plane.
///
/// Implemented by:
/// - `preflight_adapters::MemoryCloud` (testing, snapshot files)
/// - an SDK-backed client (future: live account)
///
/// ## Contract
///
/// - Every method either returns the resource, `LookupError::NotFound`, or
///   another `LookupError` for a failed call. Implementations must keep
///   "absent" and "failed" apart; validators report them differently.
/// - Implementations should honour `ctx.timeout()` and stop early when
///   `ctx.is_cancelled()` turns true. Retries, if any, happen in here.
/// - Calls are synchronous and must be safe to issue from several threads.
pub trait CloudApi: Send + Sync {
    /// Availability zones of a VPC region, e.g. `us-south-1`.
    fn vpc_zones(&self, ctx: &LookupContext, region: &str) -> LookupResult<Vec<String>>;

    /// A resource group by exact ID or name.
    fn resource_group(&self, ctx: &LookupContext, name_or_id: &str) -> LookupResult<ResourceGroup>;

    /// Every resource group in the account.
    fn resource_groups(&self, ctx: &LookupContext) -> LookupResult<Vec<ResourceGroup>>;

    /// A CIS instance by CRN.
    fn cis_instance(&self, ctx: &LookupContext, crn: &str) -> LookupResult<DnsInstance>;

    /// ID of the active zone `domain` managed by the CIS instance `crn`.
    fn zone_id_by_name(&self, ctx: &LookupContext, crn: &str, domain: &str) -> LookupResult<String>;

    /// Every DNS zone across all CIS instances in the account.
    fn dns_zones(&self, ctx: &LookupContext) -> LookupResult<Vec<DnsZone>>;

    /// A custom image by name, scoped to `region`.
    fn custom_image_by_name(
        &self,
        ctx: &LookupContext,
        name: &str,
        region: &str,
    ) -> LookupResult<CustomImage>;

    /// A VPC by name or ID, optionally scoped to a resource group ID.
    fn vpc(
        &self,
        ctx: &LookupContext,
        name_or_id: &str,
        resource_group_id: Option<&str>,
    ) -> LookupResult<Vpc>;

    /// A subnet by ID.
    fn subnet(&self, ctx: &LookupContext, id: &str) -> LookupResult<Subnet>;

    /// The full catalog of instance profiles.
    fn instance_profiles(&self, ctx: &LookupContext) -> LookupResult<Vec<InstanceProfile>>;

    /// A key-management key by ID or CRN.
    fn encryption_key(&self, ctx: &LookupContext, id: &str) -> LookupResult<EncryptionKey>;
}
