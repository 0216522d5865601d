//! In-memory cloud account.
//!
//! Holds a [`CloudSnapshot`] behind a lock and answers [`CloudApi`] lookups
//! from it. Used by tests and by the CLI when validating against snapshot
//! files instead of a live account.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard},
    thread,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use preflight_core::{
    application::{LookupContext, LookupError, LookupResult, ports::CloudApi},
    domain::{
        CustomImage, DnsInstance, DnsZone, EncryptionKey, InstanceProfile, ResourceGroup, Subnet,
        Vpc,
    },
};

/// How often a delayed lookup checks for cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Everything the account knows about, as plain data.
///
/// This is also the on-disk snapshot format; every table is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudSnapshot {
    /// Region name to its availability zones.
    pub zones: BTreeMap<String, Vec<String>>,
    pub resource_groups: Vec<ResourceGroup>,
    pub cis_instances: Vec<DnsInstance>,
    pub dns_zones: Vec<DnsZone>,
    pub images: Vec<CustomImage>,
    pub vpcs: Vec<Vpc>,
    pub subnets: Vec<Subnet>,
    pub instance_profiles: Vec<InstanceProfile>,
    pub encryption_keys: Vec<EncryptionKey>,
}

impl CloudSnapshot {
    /// Append another snapshot's tables to this one.
    ///
    /// Zones of a region present in both are replaced by `other`'s.
    pub fn merge(&mut self, other: CloudSnapshot) {
        self.zones.extend(other.zones);
        self.resource_groups.extend(other.resource_groups);
        self.cis_instances.extend(other.cis_instances);
        self.dns_zones.extend(other.dns_zones);
        self.images.extend(other.images);
        self.vpcs.extend(other.vpcs);
        self.subnets.extend(other.subnets);
        self.instance_profiles.extend(other.instance_profiles);
        self.encryption_keys.extend(other.encryption_keys);
    }

    /// A zone implies the CIS instance that owns it.
    fn register_zone_owners(&mut self) {
        for zone in &self.dns_zones {
            if !self
                .cis_instances
                .iter()
                .any(|i| i.crn == zone.cis_instance_crn)
            {
                self.cis_instances.push(DnsInstance {
                    crn: zone.cis_instance_crn.clone(),
                    name: zone.cis_instance_name.clone(),
                });
            }
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: CloudSnapshot,
    /// Operation name to the transport error it should return.
    faults: HashMap<String, String>,
    latency: Option<Duration>,
}

/// Thread-safe in-memory cloud account.
///
/// Clones share state, so a test can keep a handle and keep adding
/// resources after the service took ownership of another one.
#[derive(Debug, Clone, Default)]
pub struct MemoryCloud {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCloud {
    /// Create an empty account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account holding `snapshot`.
    pub fn from_snapshot(mut snapshot: CloudSnapshot) -> Self {
        snapshot.register_zone_owners();
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: snapshot,
                ..Default::default()
            })),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CloudSnapshot {
        self.read().state.clone()
    }

    // ── builders ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn with_region<I, S>(self, region: impl Into<String>, zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|s| {
            s.zones
                .insert(region.into(), zones.into_iter().map(Into::into).collect());
        })
    }

    #[must_use]
    pub fn with_resource_group(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let group = ResourceGroup {
            id: id.into(),
            name: name.into(),
        };
        self.update(|s| s.resource_groups.push(group))
    }

    /// Add a DNS zone, registering its CIS instance if it is new.
    #[must_use]
    pub fn with_dns_zone(self, zone: DnsZone) -> Self {
        self.update(|s| {
            s.dns_zones.push(zone);
            s.register_zone_owners();
        })
    }

    /// Add a CIS instance that owns no zones.
    #[must_use]
    pub fn with_cis_instance(self, crn: impl Into<String>, name: impl Into<String>) -> Self {
        let instance = DnsInstance {
            crn: crn.into(),
            name: name.into(),
        };
        self.update(|s| s.cis_instances.push(instance))
    }

    #[must_use]
    pub fn with_image(self, image: CustomImage) -> Self {
        self.update(|s| s.images.push(image))
    }

    #[must_use]
    pub fn with_vpc(self, vpc: Vpc) -> Self {
        self.update(|s| s.vpcs.push(vpc))
    }

    #[must_use]
    pub fn with_subnet(self, subnet: Subnet) -> Self {
        self.update(|s| s.subnets.push(subnet))
    }

    #[must_use]
    pub fn with_instance_profile(self, profile: InstanceProfile) -> Self {
        self.update(|s| s.instance_profiles.push(profile))
    }

    #[must_use]
    pub fn with_encryption_key(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let key = EncryptionKey {
            id: id.into(),
            name: name.into(),
        };
        self.update(|s| s.encryption_keys.push(key))
    }

    /// Make `operation` fail with a transport error carrying `message`.
    ///
    /// Operation names are the `CloudApi` method names, e.g. `"vpc_zones"`.
    #[must_use]
    pub fn with_fault(self, operation: impl Into<String>, message: impl Into<String>) -> Self {
        self.write().faults.insert(operation.into(), message.into());
        self
    }

    /// Delay every lookup, e.g. to exercise timeouts.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        self.write().latency = Some(latency);
        self
    }

    // ── internals ────────────────────────────────────────────────────────

    fn update(self, f: impl FnOnce(&mut CloudSnapshot)) -> Self {
        f(&mut self.write().state);
        self
    }

    // A panic while holding the lock cannot leave the tables half-written
    // in a way lookups care about, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Common prologue of every lookup: latency, cancellation, faults.
    fn enter(
        &self,
        ctx: &LookupContext,
        operation: &'static str,
    ) -> LookupResult<RwLockReadGuard<'_, Inner>> {
        let latency = self.read().latency;
        if let Some(latency) = latency {
            Self::wait(ctx, operation, latency)?;
        }
        if ctx.is_cancelled() {
            return Err(LookupError::Cancelled);
        }

        let inner = self.read();
        if let Some(message) = inner.faults.get(operation) {
            debug!(operation, message = %message, "injected fault");
            return Err(LookupError::transport(operation, message.clone()));
        }
        Ok(inner)
    }

    /// Sleep for `latency`, giving up at the context's deadline or as soon
    /// as the run is cancelled.
    fn wait(ctx: &LookupContext, operation: &'static str, latency: Duration) -> LookupResult<()> {
        let started = Instant::now();
        let deadline = latency.min(ctx.timeout());

        loop {
            if ctx.is_cancelled() {
                debug!(operation, "cancelled while waiting");
                return Err(LookupError::Cancelled);
            }
            let elapsed = started.elapsed();
            if elapsed >= deadline {
                break;
            }
            thread::sleep((deadline - elapsed).min(POLL_INTERVAL));
        }

        if latency > ctx.timeout() {
            debug!(operation, "deadline reached while waiting");
            return Err(LookupError::Timeout(ctx.timeout()));
        }
        Ok(())
    }
}

impl CloudApi for MemoryCloud {
    fn vpc_zones(&self, ctx: &LookupContext, region: &str) -> LookupResult<Vec<String>> {
        let inner = self.enter(ctx, "vpc_zones")?;
        inner
            .state
            .zones
            .get(region)
            .cloned()
            .ok_or_else(|| LookupError::not_found("region", region))
    }

    fn resource_group(&self, ctx: &LookupContext, name_or_id: &str) -> LookupResult<ResourceGroup> {
        let inner = self.enter(ctx, "resource_group")?;
        inner
            .state
            .resource_groups
            .iter()
            .find(|g| g.matches(name_or_id))
            .cloned()
            .ok_or_else(|| LookupError::not_found("resource group", name_or_id))
    }

    fn resource_groups(&self, ctx: &LookupContext) -> LookupResult<Vec<ResourceGroup>> {
        let inner = self.enter(ctx, "resource_groups")?;
        Ok(inner.state.resource_groups.clone())
    }

    fn cis_instance(&self, ctx: &LookupContext, crn: &str) -> LookupResult<DnsInstance> {
        let inner = self.enter(ctx, "cis_instance")?;
        inner
            .state
            .cis_instances
            .iter()
            .find(|i| i.crn == crn)
            .cloned()
            .ok_or_else(|| LookupError::not_found("CIS instance", crn))
    }

    fn zone_id_by_name(&self, ctx: &LookupContext, crn: &str, domain: &str) -> LookupResult<String> {
        let inner = self.enter(ctx, "zone_id_by_name")?;
        inner
            .state
            .dns_zones
            .iter()
            .find(|z| z.cis_instance_crn == crn && z.name == domain)
            .map(|z| z.id.clone())
            .ok_or_else(|| LookupError::not_found("DNS zone", domain))
    }

    fn dns_zones(&self, ctx: &LookupContext) -> LookupResult<Vec<DnsZone>> {
        let inner = self.enter(ctx, "dns_zones")?;
        Ok(inner.state.dns_zones.clone())
    }

    fn custom_image_by_name(
        &self,
        ctx: &LookupContext,
        name: &str,
        region: &str,
    ) -> LookupResult<CustomImage> {
        let inner = self.enter(ctx, "custom_image_by_name")?;
        inner
            .state
            .images
            .iter()
            .find(|i| i.name == name && i.region == region)
            .cloned()
            .ok_or_else(|| LookupError::not_found("image", name))
    }

    fn vpc(
        &self,
        ctx: &LookupContext,
        name_or_id: &str,
        resource_group_id: Option<&str>,
    ) -> LookupResult<Vpc> {
        let inner = self.enter(ctx, "vpc")?;

        // The scope may be a group name when it comes straight from the
        // install config.
        let scope = resource_group_id.map(|group| {
            inner
                .state
                .resource_groups
                .iter()
                .find(|g| g.matches(group))
                .map_or(group, |g| g.id.as_str())
        });

        inner
            .state
            .vpcs
            .iter()
            .find(|v| {
                (v.id == name_or_id || v.name == name_or_id)
                    && scope.is_none_or(|id| v.resource_group_id == id)
            })
            .cloned()
            .ok_or_else(|| LookupError::not_found("VPC", name_or_id))
    }

    fn subnet(&self, ctx: &LookupContext, id: &str) -> LookupResult<Subnet> {
        let inner = self.enter(ctx, "subnet")?;
        inner
            .state
            .subnets
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| LookupError::not_found("subnet", id))
    }

    fn instance_profiles(&self, ctx: &LookupContext) -> LookupResult<Vec<InstanceProfile>> {
        let inner = self.enter(ctx, "instance_profiles")?;
        Ok(inner.state.instance_profiles.clone())
    }

    fn encryption_key(&self, ctx: &LookupContext, id: &str) -> LookupResult<EncryptionKey> {
        let inner = self.enter(ctx, "encryption_key")?;
        inner
            .state
            .encryption_keys
            .iter()
            .find(|k| k.id == id)
            .cloned()
            .ok_or_else(|| LookupError::not_found("encryption key", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_core::application::CancellationFlag;

    fn zone(name: &str, crn: &str) -> DnsZone {
        DnsZone {
            id: format!("{name}-id"),
            name: name.into(),
            cis_instance_crn: crn.into(),
            cis_instance_name: "cis".into(),
        }
    }

    #[test]
    fn clones_share_state() {
        let cloud = MemoryCloud::new();
        let handle = cloud.clone().with_resource_group("rg-id", "Default");
        let ctx = LookupContext::new();

        assert_eq!(cloud.resource_groups(&ctx).unwrap().len(), 1);
        assert_eq!(handle.snapshot().resource_groups[0].name, "Default");
    }

    #[test]
    fn dns_zone_registers_its_instance_once() {
        let cloud = MemoryCloud::new()
            .with_dns_zone(zone("a.domain", "crn-1"))
            .with_dns_zone(zone("b.domain", "crn-1"));
        let ctx = LookupContext::new();

        assert_eq!(cloud.snapshot().cis_instances.len(), 1);
        assert_eq!(cloud.cis_instance(&ctx, "crn-1").unwrap().name, "cis");
        assert_eq!(cloud.zone_id_by_name(&ctx, "crn-1", "b.domain").unwrap(), "b.domain-id");
        assert!(
            cloud
                .zone_id_by_name(&ctx, "crn-2", "b.domain")
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn vpc_scope_accepts_group_name_or_id() {
        let cloud = MemoryCloud::new()
            .with_resource_group("rg-id", "Default")
            .with_vpc(Vpc {
                id: "vpc-id".into(),
                name: "vpc".into(),
                resource_group_id: "rg-id".into(),
            });
        let ctx = LookupContext::new();

        assert!(cloud.vpc(&ctx, "vpc", None).is_ok());
        assert!(cloud.vpc(&ctx, "vpc-id", Some("rg-id")).is_ok());
        assert!(cloud.vpc(&ctx, "vpc", Some("Default")).is_ok());
        assert!(cloud.vpc(&ctx, "vpc", Some("other")).unwrap_err().is_not_found());
    }

    #[test]
    fn faults_are_transport_errors() {
        let cloud = MemoryCloud::new()
            .with_region("us-south", ["us-south-1"])
            .with_fault("vpc_zones", "connection reset");
        let err = cloud.vpc_zones(&LookupContext::new(), "us-south").unwrap_err();

        assert!(matches!(err, LookupError::Transport { operation: "vpc_zones", .. }));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn cancelled_context_short_circuits() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let ctx = LookupContext::new().with_cancellation(flag);
        let cloud = MemoryCloud::new().with_region("us-south", ["us-south-1"]);

        assert_eq!(cloud.vpc_zones(&ctx, "us-south"), Err(LookupError::Cancelled));
    }

    #[test]
    fn latency_is_cut_short_by_the_timeout() {
        let cloud = MemoryCloud::new()
            .with_region("us-south", ["us-south-1"])
            .with_latency(Duration::from_secs(3));
        let ctx = LookupContext::new().with_timeout(Duration::from_millis(50));

        let started = Instant::now();
        let result = cloud.vpc_zones(&ctx, "us-south");

        assert_eq!(result, Err(LookupError::Timeout(Duration::from_millis(50))));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn cancellation_interrupts_latency() {
        let flag = CancellationFlag::new();
        let ctx = LookupContext::new().with_cancellation(flag.clone());
        let cloud = MemoryCloud::new()
            .with_region("us-south", ["us-south-1"])
            .with_latency(Duration::from_secs(3));

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.cancel();
        });

        let started = Instant::now();
        let result = cloud.vpc_zones(&ctx, "us-south");
        canceller.join().unwrap();

        assert_eq!(result, Err(LookupError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn latency_within_the_timeout_still_answers() {
        let cloud = MemoryCloud::new()
            .with_region("us-south", ["us-south-1"])
            .with_latency(Duration::from_millis(10));
        let ctx = LookupContext::new().with_timeout(Duration::from_secs(5));

        assert_eq!(
            cloud.vpc_zones(&ctx, "us-south").unwrap(),
            vec!["us-south-1".to_string()]
        );
    }

    #[test]
    fn merge_replaces_region_zones_and_appends_tables() {
        let mut base = MemoryCloud::new()
            .with_region("us-south", ["us-south-1"])
            .with_encryption_key("k1", "one")
            .snapshot();
        let extra = MemoryCloud::new()
            .with_region("us-south", ["us-south-1", "us-south-2"])
            .with_encryption_key("k2", "two")
            .snapshot();

        base.merge(extra);
        assert_eq!(base.zones["us-south"].len(), 2);
        assert_eq!(base.encryption_keys.len(), 2);
    }
}
