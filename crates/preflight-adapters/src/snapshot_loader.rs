//! Filesystem-based cloud snapshot loader.
//!
//! Reads [`CloudSnapshot`] files and merges them into one [`MemoryCloud`],
//! so an install config can be checked against a recorded account.
//!
//! # Accepted inputs
//!
//! - a single `.toml` or `.json` file
//! - a directory, walked recursively; every `.toml` / `.json` file inside is
//!   loaded in path order and other files are ignored
//!
//! # Snapshot format
//!
//! ```toml
//! [zones]
//! us-south = ["us-south-1", "us-south-2", "us-south-3"]
//!
//! [[resource_groups]]
//! id   = "4a8b2c"
//! name = "Default"
//!
//! [[dns_zones]]
//! id                = "zone-1"
//! name              = "example.com"
//! cis_instance_crn  = "crn:v1:bluemix:public:internet-svcs:global:a/acct:inst::"
//! cis_instance_name = "my-cis"
//!
//! [[images]]
//! id     = "r006-1"
//! name   = "rhcos-414"
//! region = "us-south"
//!
//! [[instance_profiles]]
//! name       = "bx2-4x16"
//! vcpu       = 4
//! memory_gib = 16
//! ```
//!
//! `cis_instances`, `vpcs`, `subnets` and `encryption_keys` follow the same
//! pattern. CIS instances owning a listed zone need not be repeated.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::memory::{CloudSnapshot, MemoryCloud};

/// Failure to read a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported snapshot format '{}' (expected .toml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl SnapshotError {
    /// The file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::UnsupportedFormat { path } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads snapshot files and directories into a [`MemoryCloud`].
///
/// # Example
///
/// ```no_run
/// use preflight_adapters::SnapshotLoader;
///
/// let cloud = SnapshotLoader::new(["./snapshots"]).load()?;
/// # Ok::<(), preflight_adapters::SnapshotError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotLoader {
    paths: Vec<PathBuf>,
}

impl SnapshotLoader {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Merge every path, in order, into one account.
    pub fn load(&self) -> Result<MemoryCloud, SnapshotError> {
        Ok(MemoryCloud::from_snapshot(self.load_snapshot()?))
    }

    /// Like [`load`](Self::load), without building the account.
    pub fn load_snapshot(&self) -> Result<CloudSnapshot, SnapshotError> {
        let mut merged = CloudSnapshot::default();
        for path in &self.paths {
            merged.merge(load_path(path)?);
        }
        Ok(merged)
    }
}

/// Load one file, or every snapshot file below a directory.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_path(path: &Path) -> Result<CloudSnapshot, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_dir() {
        return load_file(path);
    }

    let mut merged = CloudSnapshot::default();
    let mut files = 0usize;
    for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| SnapshotError::Io {
            path: e.path().map_or_else(|| path.to_path_buf(), Path::to_path_buf),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() || Format::of(entry.path()).is_none() {
            continue;
        }
        merged.merge(load_file(entry.path())?);
        files += 1;
    }

    debug!(files, "loaded snapshot directory");
    Ok(merged)
}

/// Parse a single snapshot file; the format follows the extension.
pub fn load_file(path: &Path) -> Result<CloudSnapshot, SnapshotError> {
    let format = Format::of(path).ok_or_else(|| SnapshotError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: Result<CloudSnapshot, String> = match format {
        Format::Toml => toml::from_str(&raw).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(&raw).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| SnapshotError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_core::application::{LookupContext, ports::CloudApi};
    use std::{fs::File, io::Write};
    use tempfile::TempDir;

    const ZONES: &str = r#"
[zones]
us-south = ["us-south-1", "us-south-2"]

[[resource_groups]]
id = "rg-id"
name = "Default"
"#;

    const DNS: &str = r#"{
  "dns_zones": [
    {
      "id": "zone-id",
      "name": "example.com",
      "cis_instance_crn": "crn:v1:bluemix:public:internet-svcs:global:a/acct:inst::",
      "cis_instance_name": "cis"
    }
  ]
}"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn loads_a_single_toml_file() {
        let temp = TempDir::new().unwrap();
        let file = write(temp.path(), "cloud.toml", ZONES);

        let snapshot = load_file(&file).unwrap();
        assert_eq!(snapshot.zones["us-south"], ["us-south-1", "us-south-2"]);
        assert_eq!(snapshot.resource_groups[0].id, "rg-id");
    }

    #[test]
    fn directory_merges_toml_and_json_and_skips_others() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.toml", ZONES);
        write(temp.path(), "nested/b.json", DNS);
        write(temp.path(), "README.md", "not a snapshot");

        let cloud = SnapshotLoader::new([temp.path()]).load().unwrap();
        let ctx = LookupContext::new();

        assert_eq!(cloud.vpc_zones(&ctx, "us-south").unwrap().len(), 2);
        assert_eq!(
            cloud
                .zone_id_by_name(
                    &ctx,
                    "crn:v1:bluemix:public:internet-svcs:global:a/acct:inst::",
                    "example.com"
                )
                .unwrap(),
            "zone-id"
        );
        // The zone's owner is registered without being listed.
        assert_eq!(cloud.snapshot().cis_instances.len(), 1);
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = SnapshotLoader::new(["/absolutely/does/not/exist.toml"])
            .load()
            .unwrap_err();
        assert!(matches!(err, SnapshotError::NotFound { .. }));
    }

    #[test]
    fn malformed_file_names_the_file() {
        let temp = TempDir::new().unwrap();
        let file = write(temp.path(), "broken.toml", "[[resource_groups]\nid = ");

        let err = load_path(&file).unwrap_err();
        assert!(matches!(err, SnapshotError::Parse { .. }));
        assert_eq!(err.path(), file.as_path());
    }

    #[test]
    fn explicit_file_with_unknown_extension_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = write(temp.path(), "cloud.yaml", "zones: {}");

        assert!(matches!(
            load_path(&file),
            Err(SnapshotError::UnsupportedFormat { .. })
        ));
    }
}
