// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::types::{OutputFormat, UnknownLayerPolicy};

/// Command-line arguments for `agdeps`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "agdeps",
    version,
    about = "Resolve the order in which annotation layer managers must run.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the pipeline file (TOML).
    ///
    /// Default: `Pipeline.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Output format for the resolved plan.
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override `[config].unknown_layers` ("ignore" or "error").
    #[arg(long, value_name = "POLICY")]
    pub unknown_layers: Option<UnknownLayerPolicy>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AGDEPS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate and list the managers, but don't print a plan.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
