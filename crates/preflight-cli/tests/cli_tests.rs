//! End-to-end tests for the `preflight` binary.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CRN: &str = "crn:v1:bluemix:public:internet-svcs:global:a/account:instance::";

const SNAPSHOT: &str = r#"
[zones]
us-south = ["us-south-1", "us-south-2", "us-south-3"]

[[resource_groups]]
id   = "rg-id"
name = "Default"

[[dns_zones]]
id                = "zone-id"
name              = "base.domain"
cis_instance_crn  = "crn:v1:bluemix:public:internet-svcs:global:a/account:instance::"
cis_instance_name = "cis"

[[images]]
id     = "image-id"
name   = "valid-rhcos-image-name"
region = "us-south"

[[vpcs]]
id                = "vpc-id"
name              = "valid-vpc-name"
resource_group_id = "rg-id"

[[subnets]]
id     = "valid-subnet-1"
name   = "valid-subnet-1"
zone   = "us-south-1"
vpc_id = "vpc-id"

[[subnets]]
id     = "valid-subnet-2"
name   = "valid-subnet-2"
zone   = "us-south-2"
vpc_id = "vpc-id"

[[instance_profiles]]
name       = "bx2-4x16"
vcpu       = 4
memory_gib = 16

[[encryption_keys]]
id   = "key-id"
name = "root-key"
"#;

/// A sandbox with its own HOME so no user configuration leaks in.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            dir: TempDir::new().unwrap(),
        };
        sandbox.write("account.toml", SNAPSHOT);
        sandbox
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("preflight").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn install_config(region: &str, image: &str, subnets: &[&str]) -> String {
    serde_json::json!({
        "metadata": { "name": "test-cluster" },
        "baseDomain": "base.domain",
        "platform": {
            "ibmcloud": {
                "region": region,
                "cisInstanceCRN": CRN,
                "clusterOSImage": image,
                "resourceGroup": "Default",
                "vpc": "valid-vpc-name",
                "subnets": subnets,
            }
        },
        "controlPlane": {
            "name": "master",
            "platform": { "ibmcloud": { "type": "bx2-4x16", "zones": ["us-south-1"] } }
        },
        "compute": [
            { "name": "worker", "platform": { "ibmcloud": { "type": "bx2-4x16" } } }
        ]
    })
    .to_string()
}

fn valid_install_config() -> String {
    install_config(
        "us-south",
        "valid-rhcos-image-name",
        &["valid-subnet-1", "valid-subnet-2"],
    )
}

// ── validate ──────────────────────────────────────────────────────────────────

#[test]
fn valid_config_passes() {
    let sb = Sandbox::new();
    sb.write("install-config.json", &valid_install_config());

    sb.cmd()
        .args(["validate", "install-config.json", "--cloud", "account.toml"])
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("install-config.json is valid"));
}

#[test]
fn cloud_defects_are_listed_and_exit_with_two() {
    let sb = Sandbox::new();
    sb.write(
        "install-config.json",
        &install_config("us-south", "missing-image", &["valid-subnet-1", "ghost"]),
    );

    sb.cmd()
        .args(["validate", "install-config.json", "--cloud", "account.toml"])
        .args(["--output-format", "plain"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            r#"platform.ibmcloud.clusterOSImage: Not found: "missing-image""#,
        ))
        .stdout(predicate::str::contains(
            r#"platform.ibmcloud.subnets: Not found: "ghost""#,
        ))
        .stderr(predicate::str::contains("Validation failed with 2 error(s)"));
}

#[test]
fn json_report_is_machine_readable() {
    let sb = Sandbox::new();
    sb.write(
        "install-config.json",
        &install_config("us-south", "missing-image", &["valid-subnet-1"]),
    );

    let out = sb
        .cmd()
        .args(["validate", "install-config.json", "--cloud", "account.toml"])
        .args(["--output-format", "json"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["errors"][0]["path"], "platform.ibmcloud.clusterOSImage");
    assert_eq!(report["errors"][0]["kind"], "NotFound");
    assert_eq!(report["errors"][0]["value"], "missing-image");
    assert!(report["checked_at"].is_string());
}

#[test]
fn offline_checks_need_no_snapshot() {
    let sb = Sandbox::new();
    sb.write(
        "install-config.toml",
        &format!(
            "baseDomain = \"base.domain\"\n\n[platform.ibmcloud]\nregion = \"mars-1\"\ncisInstanceCRN = \"{CRN}\"\nclusterOSImage = \"img\"\n"
        ),
    );

    sb.cmd()
        .args(["validate", "install-config.toml", "--offline"])
        .args(["--output-format", "plain"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            r#"platform.ibmcloud.region: Unsupported value: "mars-1""#,
        ))
        .stdout(predicate::str::contains("--offline"));
}

#[test]
fn offline_defects_skip_the_cloud() {
    let sb = Sandbox::new();
    sb.write(
        "install-config.json",
        &install_config("us-south", "", &["valid-subnet-1"]),
    );

    // The snapshot does not exist, but is never read.
    sb.cmd()
        .args(["validate", "install-config.json", "--cloud", "absent.toml"])
        .args(["--output-format", "plain"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "platform.ibmcloud.clusterOSImage: Required value",
        ));
}

#[test]
fn missing_snapshot_is_not_found() {
    let sb = Sandbox::new();
    sb.write("install-config.json", &valid_install_config());

    sb.cmd()
        .args(["validate", "install-config.json", "--cloud", "absent.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("snapshot not found"))
        .stderr(predicate::str::contains("--offline"));
}

#[test]
fn install_config_without_platform_is_a_configuration_error() {
    let sb = Sandbox::new();
    sb.write("install-config.json", r#"{"baseDomain":"base.domain"}"#);

    sb.cmd()
        .args(["validate", "install-config.json", "--offline"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ibmcloud"));
}

#[test]
fn unknown_install_config_extension_is_rejected() {
    let sb = Sandbox::new();
    sb.write("install-config.yaml", "baseDomain: x\n");

    sb.cmd()
        .args(["validate", "install-config.yaml", "--offline"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid input"));
}

// ── other commands ────────────────────────────────────────────────────────────

#[test]
fn metadata_prints_region_and_resource_group() {
    let sb = Sandbox::new();
    sb.write("install-config.json", &valid_install_config());

    let out = sb
        .cmd()
        .args(["metadata", "install-config.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let metadata: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        metadata,
        serde_json::json!({ "region": "us-south", "resourceGroupID": "Default" })
    );
}

#[test]
fn regions_lists_the_default_catalog() {
    Sandbox::new()
        .cmd()
        .args(["regions", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("us-south (US South (Dallas))"))
        .stdout(predicate::str::contains("ca-tor"));
}

#[test]
fn regions_follow_the_config_file() {
    let sb = Sandbox::new();
    sb.write(
        "custom.toml",
        "[regions]\nlab-1 = \"Lab\"\n",
    );

    sb.cmd()
        .args(["--config", "custom.toml", "regions", "--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""lab-1": "Lab""#))
        .stdout(predicate::str::contains("us-south").not());
}

#[test]
fn zones_lists_the_snapshot_zones() {
    Sandbox::new()
        .cmd()
        .args(["zones", "--cloud", "account.toml", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base.domain (cis)"));
}

#[test]
fn init_writes_a_loadable_config() {
    let sb = Sandbox::new();

    sb.cmd().args(["init", "--local"]).assert().success();
    assert!(sb.path().join(".preflight.toml").is_file());

    // A second init leaves the file alone without --force.
    sb.write(".preflight.toml", "[lookup]\ntimeout_secs = 7\n");
    sb.cmd().args(["init", "--local"]).assert().success();

    sb.cmd()
        .args(["config", "get", "lookup.timeout_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lookup.timeout_secs = 7"));
}

#[test]
fn config_path_prefers_the_local_file() {
    let sb = Sandbox::new();
    sb.write(".preflight.toml", "");

    sb.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".preflight.toml"))
        .stdout(predicate::str::contains("not created yet").not());
}

#[test]
fn environment_overrides_the_config_file() {
    Sandbox::new()
        .cmd()
        .env("PREFLIGHT__LOOKUP__TIMEOUT_SECS", "12")
        .args(["config", "get", "lookup.timeout_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("= 12"));
}

#[test]
fn no_color_accepts_conventional_values() {
    for value in ["1", "yes", "0", ""] {
        Sandbox::new()
            .cmd()
            .env("NO_COLOR", value)
            .args(["regions", "--output-format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("us-south"));
    }
}

#[test]
fn explicit_missing_config_is_a_configuration_error() {
    Sandbox::new()
        .cmd()
        .args(["--config", "nope.toml", "regions"])
        .assert()
        .code(4);
}
