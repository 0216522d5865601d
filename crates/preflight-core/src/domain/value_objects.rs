//! Domain value objects: Crn, RegionCatalog.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. The
//! region catalog is an immutable value injected into the validators, so the
//! set of supported regions can differ per deployment or per test.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Crn ───────────────────────────────────────────────────────────────────────

const CRN_SEGMENTS: usize = 10;

/// An IBM Cloud Resource Name.
///
/// `crn:version:cname:ctype:service-name:location:scope:service-instance:resource-type:resource`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Crn {
    segments: Vec<String>,
}

impl Crn {
    pub fn version(&self) -> &str {
        &self.segments[1]
    }

    pub fn service_name(&self) -> &str {
        &self.segments[4]
    }

    pub fn location(&self) -> &str {
        &self.segments[5]
    }

    pub fn scope(&self) -> &str {
        &self.segments[6]
    }

    pub fn service_instance(&self) -> &str {
        &self.segments[7]
    }
}

impl fmt::Display for Crn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(":"))
    }
}

impl FromStr for Crn {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidCrn {
            crn: s.to_owned(),
            reason: reason.to_owned(),
        };

        let segments: Vec<String> = s.split(':').map(str::to_owned).collect();
        if segments.len() != CRN_SEGMENTS {
            return Err(invalid(&format!(
                "expected {CRN_SEGMENTS} segments, found {}",
                segments.len()
            )));
        }
        if segments[0] != "crn" {
            return Err(invalid("must start with 'crn'"));
        }
        if segments[1].is_empty() {
            return Err(invalid("version segment is empty"));
        }

        Ok(Self { segments })
    }
}

// ── RegionCatalog ─────────────────────────────────────────────────────────────

/// The set of regions an install may target, keyed by short name.
///
/// Values are human-readable display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCatalog {
    regions: BTreeMap<String, String>,
}

impl RegionCatalog {
    /// IBM Cloud regions where VPCs are supported.
    pub fn ibm_vpc_default() -> Self {
        Self::from_pairs([
            ("us-south", "US South (Dallas)"),
            ("us-east", "US East (Washington DC)"),
            ("eu-gb", "United Kingdom (London)"),
            ("eu-de", "EU Germany (Frankfurt)"),
            ("jp-tok", "Japan (Tokyo)"),
            ("jp-osa", "Japan (Osaka)"),
            ("au-syd", "Australia (Sydney)"),
            ("ca-tor", "Canada (Toronto)"),
        ])
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            regions: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    /// Short names in ascending order.
    pub fn short_names(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    pub fn display_name(&self, region: &str) -> Result<&str, DomainError> {
        self.regions
            .get(region)
            .map(String::as_str)
            .ok_or_else(|| DomainError::UnknownRegion {
                region: region.to_owned(),
            })
    }

    /// `"us-south (US South (Dallas))"` for every region, sorted.
    pub fn describe(&self) -> Vec<String> {
        self.regions
            .iter()
            .map(|(short, long)| format!("{short} ({long})"))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::ibm_vpc_default()
    }
}
