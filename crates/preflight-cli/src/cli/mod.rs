//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "preflight",
    bin_name = "preflight",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Check an IBM Cloud install config before installing",
    long_about = "Preflight cross-checks a cluster install config against an \
                  IBM Cloud account: region, DNS zone, image, resource group, \
                  VPC, subnets and machine pools. Every problem is reported \
                  in one pass.",
    after_help = "EXAMPLES:\n\
        \x20 preflight validate install-config.json --cloud account.toml\n\
        \x20 preflight validate install-config.toml --offline\n\
        \x20 preflight zones --cloud snapshots/\n\
        \x20 preflight metadata install-config.json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate an install config.
    #[command(
        visible_alias = "check",
        about = "Validate an install config",
        after_help = "EXAMPLES:\n\
            \x20 preflight validate install-config.json --cloud account.toml\n\
            \x20 preflight validate install-config.json --cloud base.toml --cloud network.json\n\
            \x20 preflight validate install-config.json --offline --output-format json"
    )]
    Validate(ValidateArgs),

    /// Print the cluster metadata teardown tooling needs.
    #[command(about = "Print cluster metadata as JSON")]
    Metadata(MetadataArgs),

    /// List the regions install configs may use.
    #[command(about = "List supported regions")]
    Regions,

    /// List the DNS zones visible in an account.
    #[command(
        about = "List DNS zones usable as base domain",
        after_help = "EXAMPLES:\n\
            \x20 preflight zones --cloud account.toml"
    )]
    Zones(ZonesArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 preflight init                   # default location\n\
            \x20 preflight init --local           # ./.preflight.toml\n\
            \x20 preflight --config my.toml init  # explicit path"
    )]
    Init(InitArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 preflight config get lookup.timeout_secs\n\
            \x20 preflight config list\n\
            \x20 preflight config path"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `preflight validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Install config to check. The format follows the extension.
    #[arg(value_name = "INSTALL_CONFIG", help = "Install config file (JSON or TOML)")]
    pub install_config: PathBuf,

    /// Cloud snapshot files or directories, merged in order.
    #[arg(
        long = "cloud",
        value_name = "SNAPSHOT",
        required_unless_present = "offline",
        num_args = 1..,
        help = "Cloud snapshot file or directory (repeatable)"
    )]
    pub cloud: Vec<PathBuf>,

    /// Only run checks that need no cloud access.
    #[arg(long = "offline", help = "Skip checks that query the cloud")]
    pub offline: bool,
}

// ── metadata ──────────────────────────────────────────────────────────────────

/// Arguments for `preflight metadata`.
#[derive(Debug, Args)]
pub struct MetadataArgs {
    #[arg(value_name = "INSTALL_CONFIG", help = "Install config file (JSON or TOML)")]
    pub install_config: PathBuf,
}

// ── zones ─────────────────────────────────────────────────────────────────────

/// Arguments for `preflight zones`.
#[derive(Debug, Args)]
pub struct ZonesArgs {
    #[arg(
        long = "cloud",
        value_name = "SNAPSHOT",
        required = true,
        num_args = 1..,
        help = "Cloud snapshot file or directory (repeatable)"
    )]
    pub cloud: Vec<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `preflight init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.preflight.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `preflight config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `lookup.timeout_secs`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from([
            "preflight",
            "validate",
            "install-config.json",
            "--cloud",
            "a.toml",
            "--cloud",
            "b.json",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.install_config, PathBuf::from("install-config.json"));
        assert_eq!(args.cloud.len(), 2);
        assert!(!args.offline);
    }

    #[test]
    fn validate_needs_cloud_unless_offline() {
        assert!(Cli::try_parse_from(["preflight", "validate", "ic.json"]).is_err());
        assert!(Cli::try_parse_from(["preflight", "validate", "ic.json", "--offline"]).is_ok());
    }

    #[test]
    fn check_alias() {
        let cli = Cli::parse_from(["preflight", "check", "ic.json", "--offline"]);
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "preflight",
            "regions",
            "-vv",
            "--output-format",
            "json",
        ]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["preflight", "--quiet", "--verbose", "regions"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_color_flag_needs_no_value() {
        let cli = Cli::parse_from(["preflight", "--no-color", "regions"]);
        assert!(cli.global.no_color);
    }

    #[test]
    fn output_format_from_config_is_case_insensitive() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("human"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::from_config("yaml"), None);
    }
}
