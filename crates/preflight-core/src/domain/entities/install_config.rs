//! The declarative install config being validated.
//!
//! Field names follow the on-disk camelCase format so a config can be read
//! straight from JSON or TOML. Optional identifiers are `Option<String>`;
//! accessors treat `Some("")` the same as `None`, because an empty
//! identifier never names anything.

use serde::{Deserialize, Serialize};

/// Root of an install config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallConfig {
    pub metadata: ObjectMeta,
    pub base_domain: String,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_plane: Option<MachinePool>,
    pub compute: Vec<MachinePool>,
}

impl InstallConfig {
    /// The IBM Cloud platform section, if present.
    pub fn ibmcloud(&self) -> Option<&IbmCloudPlatform> {
        self.platform.ibmcloud.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    pub name: String,
}

/// Cloud-provider specific sections. Only IBM Cloud is modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibmcloud: Option<IbmCloudPlatform>,
}

/// Platform-wide IBM Cloud settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IbmCloudPlatform {
    pub region: String,

    /// CRN of the CIS instance that owns the base domain zone.
    #[serde(rename = "cisInstanceCRN")]
    pub cis_instance_crn: String,

    /// Name of the custom RHCOS image nodes boot from.
    #[serde(rename = "clusterOSImage")]
    pub cluster_os_image: String,

    /// Resource group name or ID the cluster is created in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,

    /// Name of an existing VPC to install into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,

    /// Resource group of the existing VPC, when it differs from `resource_group`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_resource_group: Option<String>,

    /// IDs of existing subnets in `vpc`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_machine_platform: Option<IbmCloudMachinePool>,
}

impl IbmCloudPlatform {
    pub fn resource_group(&self) -> Option<&str> {
        non_empty(&self.resource_group)
    }

    pub fn vpc(&self) -> Option<&str> {
        non_empty(&self.vpc)
    }

    pub fn vpc_resource_group(&self) -> Option<&str> {
        non_empty(&self.vpc_resource_group)
    }

    /// Whether any bring-your-own-network field is set.
    pub fn has_network_config(&self) -> bool {
        self.vpc().is_some() || !self.subnets.is_empty()
    }
}

/// A named group of nodes (control plane or one compute pool).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachinePool {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    pub platform: MachinePoolPlatform,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachinePoolPlatform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibmcloud: Option<IbmCloudMachinePool>,
}

/// IBM Cloud settings of a machine pool. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IbmCloudMachinePool {
    /// Instance profile name, e.g. `bx2-4x16`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_volume: Option<BootVolume>,
}

impl IbmCloudMachinePool {
    pub fn instance_type(&self) -> Option<&str> {
        non_empty(&self.instance_type)
    }

    pub fn encryption_key(&self) -> Option<&str> {
        self.boot_volume
            .as_ref()
            .and_then(|volume| non_empty(&volume.encryption_key))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootVolume {
    /// Key Protect / HPCS root key CRN used to encrypt the boot volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
