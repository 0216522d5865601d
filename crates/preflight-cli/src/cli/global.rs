//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] and marked `global`, so `preflight validate
//! -vv ...` and `preflight -vv validate ...` mean the same thing.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Once for INFO (`-v`), twice for DEBUG (`-vv`), three times for TRACE
    /// (`-vvv`). `RUST_LOG` overrides this.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only print errors.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colours. Also set by any `NO_COLOR` value other than a
    /// falsey one (`0`, `false`, `no`, `off`, empty).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Overrides `output.format` from the configuration.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        help = "Output format [default: from config, else auto]"
    )]
    pub output_format: Option<OutputFormat>,
}

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured, with symbols.
    Human,
    /// No colours; stable for scripts and logs.
    Plain,
    /// One JSON document.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` configuration value.
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}
