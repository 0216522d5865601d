//! Hand-written `CloudApi` double for the validator unit tests.

use std::collections::{HashMap, HashSet};

use crate::application::{LookupContext, LookupError, LookupResult, ports::CloudApi};
use crate::domain::{
    CustomImage, DnsInstance, DnsZone, EncryptionKey, InstanceProfile, ResourceGroup, Subnet, Vpc,
};

pub(crate) const CRN: &str = "crn:v1:bluemix:public:internet-svcs:global:a/acct:inst::";
pub(crate) const BASE_DOMAIN: &str = "base.domain";

/// Answers from fixed tables; any operation named in `failing` returns a
/// transport error instead.
#[derive(Default)]
pub(crate) struct StubCloud {
    pub zones: HashMap<String, Vec<String>>,
    pub groups: Vec<ResourceGroup>,
    pub dns_zones: Vec<DnsZone>,
    pub images: Vec<CustomImage>,
    pub vpcs: Vec<Vpc>,
    pub subnets: Vec<Subnet>,
    pub profiles: Vec<InstanceProfile>,
    pub keys: Vec<EncryptionKey>,
    pub failing: HashSet<&'static str>,
}

impl StubCloud {
    /// One region, one CIS instance owning `base.domain`, one image, one
    /// VPC with a subnet per zone, two profiles and a key.
    pub fn populated() -> Self {
        Self {
            zones: HashMap::from([(
                "us-south".to_owned(),
                vec!["us-south-3".into(), "us-south-1".into(), "us-south-2".into()],
            )]),
            groups: vec![ResourceGroup {
                id: "rg-id".into(),
                name: "Default".into(),
            }],
            dns_zones: vec![DnsZone {
                id: "zone-id".into(),
                name: BASE_DOMAIN.into(),
                cis_instance_crn: CRN.into(),
                cis_instance_name: "cis".into(),
            }],
            images: vec![CustomImage {
                id: "image-id".into(),
                name: "rhcos".into(),
                region: "us-south".into(),
            }],
            vpcs: vec![Vpc {
                id: "vpc-id".into(),
                name: "valid-vpc".into(),
                resource_group_id: "rg-id".into(),
            }],
            subnets: vec![
                subnet("subnet-1", "us-south-1"),
                subnet("subnet-2", "us-south-2"),
                subnet("subnet-bad", "invalid"),
            ],
            profiles: vec![profile("bx2-4x16"), profile("bx2-8x32")],
            keys: vec![EncryptionKey {
                id: "key-id".into(),
                name: "root-key".into(),
            }],
            failing: HashSet::new(),
        }
    }

    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    fn check(&self, operation: &'static str) -> LookupResult<()> {
        if self.failing.contains(operation) {
            Err(LookupError::transport(operation, "503 Service Unavailable"))
        } else {
            Ok(())
        }
    }
}

fn subnet(id: &str, zone: &str) -> Subnet {
    Subnet {
        id: id.into(),
        name: id.into(),
        zone: zone.into(),
        vpc_id: "vpc-id".into(),
    }
}

fn profile(name: &str) -> InstanceProfile {
    InstanceProfile {
        name: name.into(),
        vcpu: 4,
        memory_gib: 16,
    }
}

impl CloudApi for StubCloud {
    fn vpc_zones(&self, _ctx: &LookupContext, region: &str) -> LookupResult<Vec<String>> {
        self.check("vpc_zones")?;
        self.zones
            .get(region)
            .cloned()
            .ok_or_else(|| LookupError::not_found("region", region))
    }

    fn resource_group(&self, _ctx: &LookupContext, name_or_id: &str) -> LookupResult<ResourceGroup> {
        self.check("resource_group")?;
        self.groups
            .iter()
            .find(|g| g.matches(name_or_id))
            .cloned()
            .ok_or_else(|| LookupError::not_found("resource group", name_or_id))
    }

    fn resource_groups(&self, _ctx: &LookupContext) -> LookupResult<Vec<ResourceGroup>> {
        self.check("resource_groups")?;
        Ok(self.groups.clone())
    }

    fn cis_instance(&self, _ctx: &LookupContext, crn: &str) -> LookupResult<DnsInstance> {
        self.check("cis_instance")?;
        self.dns_zones
            .iter()
            .find(|z| z.cis_instance_crn == crn)
            .map(|z| DnsInstance {
                crn: z.cis_instance_crn.clone(),
                name: z.cis_instance_name.clone(),
            })
            .ok_or_else(|| LookupError::not_found("cis instance", crn))
    }

    fn zone_id_by_name(&self, _ctx: &LookupContext, crn: &str, domain: &str) -> LookupResult<String> {
        self.check("zone_id_by_name")?;
        self.dns_zones
            .iter()
            .find(|z| z.cis_instance_crn == crn && z.name == domain)
            .map(|z| z.id.clone())
            .ok_or_else(|| LookupError::not_found("dns zone", domain))
    }

    fn dns_zones(&self, _ctx: &LookupContext) -> LookupResult<Vec<DnsZone>> {
        self.check("dns_zones")?;
        Ok(self.dns_zones.clone())
    }

    fn custom_image_by_name(
        &self,
        _ctx: &LookupContext,
        name: &str,
        region: &str,
    ) -> LookupResult<CustomImage> {
        self.check("custom_image_by_name")?;
        self.images
            .iter()
            .find(|i| i.name == name && i.region == region)
            .cloned()
            .ok_or_else(|| LookupError::not_found("image", name))
    }

    fn vpc(
        &self,
        _ctx: &LookupContext,
        name_or_id: &str,
        resource_group_id: Option<&str>,
    ) -> LookupResult<Vpc> {
        self.check("vpc")?;
        self.vpcs
            .iter()
            .find(|v| {
                (v.id == name_or_id || v.name == name_or_id)
                    && resource_group_id.is_none_or(|rg| v.resource_group_id == rg)
            })
            .cloned()
            .ok_or_else(|| LookupError::not_found("vpc", name_or_id))
    }

    fn subnet(&self, _ctx: &LookupContext, id: &str) -> LookupResult<Subnet> {
        self.check("subnet")?;
        self.subnets
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| LookupError::not_found("subnet", id))
    }

    fn instance_profiles(&self, _ctx: &LookupContext) -> LookupResult<Vec<InstanceProfile>> {
        self.check("instance_profiles")?;
        Ok(self.profiles.clone())
    }

    fn encryption_key(&self, _ctx: &LookupContext, id: &str) -> LookupResult<EncryptionKey> {
        self.check("encryption_key")?;
        self.keys
            .iter()
            .find(|k| k.id == id)
            .cloned()
            .ok_or_else(|| LookupError::not_found("key", id))
    }
}
