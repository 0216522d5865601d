use serde::{Deserialize, Serialize};

use super::install_config::InstallConfig;

/// What teardown tooling needs to know about an installed cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMetadata {
    pub region: String,
    /// The configured resource group, name or ID.
    #[serde(rename = "resourceGroupID", skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
}

impl ClusterMetadata {
    /// `None` when the config has no IBM Cloud platform section.
    pub fn from_install_config(config: &InstallConfig) -> Option<Self> {
        let platform = config.ibmcloud()?;
        Some(Self {
            region: platform.region.clone(),
            resource_group: platform.resource_group().map(str::to_owned),
        })
    }
}
