// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod layers;
pub mod logging;
pub mod types;

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_from_path;
use crate::config::model::ConfigFile;
use crate::dag::dot::to_dot;
use crate::layers::LayerPlan;
use crate::types::{OutputFormat, UnknownLayerPolicy};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - pipeline loading and validation
/// - the CLI's policy override
/// - plan resolution and output in the requested format
pub fn run(args: &CliArgs, out: &mut impl Write) -> Result<()> {
    let cfg = load_config(&args.config, args.unknown_layers)?;

    if args.dry_run {
        print_dry_run(&cfg, out)?;
        return Ok(());
    }

    // Validation already resolved this plan once, so it is known acyclic.
    let plan = LayerPlan::from_configs(cfg.to_manager_configs(), cfg.config.unknown_layers);

    match args.format {
        OutputFormat::Text => {
            let order = plan.resolve()?;
            info!(managers = order.len(), "writing execution order");
            for (step, manager) in order.iter().enumerate() {
                writeln!(out, "{:>3}. {}", step + 1, manager)?;
            }
        }
        OutputFormat::Dot => {
            let graph = plan.build()?;
            write!(out, "{}", to_dot(&graph))?;
        }
    }

    Ok(())
}

/// Load and validate the pipeline file, applying a policy override first.
fn load_config(path: &Path, unknown_layers: Option<UnknownLayerPolicy>) -> Result<ConfigFile> {
    let mut raw = load_from_path(path)?;
    if let Some(policy) = unknown_layers {
        debug!(?policy, "overriding [config].unknown_layers from the command line");
        raw.config.unknown_layers = policy;
    }
    Ok(ConfigFile::try_from(raw)?)
}

/// Simple dry-run output: print the policy and each manager entry.
fn print_dry_run(cfg: &ConfigFile, out: &mut impl Write) -> Result<()> {
    writeln!(out, "agdeps dry-run")?;
    writeln!(
        out,
        "  config.unknown_layers = {:?}",
        cfg.config.unknown_layers
    )?;
    writeln!(out)?;

    writeln!(out, "managers ({}):", cfg.manager.len())?;
    for entry in cfg.manager.iter() {
        writeln!(out, "  - {}", entry.display_name())?;
        writeln!(out, "      layer: {}", entry.layer)?;
        if let Some(slot) = entry.auxiliary {
            writeln!(out, "      auxiliary: {slot}")?;
        }
        if let Some(ref implementation) = entry.implementation {
            writeln!(out, "      implementation: {implementation}")?;
        }
        if !entry.requires.is_empty() {
            writeln!(out, "      requires: {:?}", entry.requires)?;
        }
        if !entry.generates.is_empty() {
            writeln!(out, "      generates: {:?}", entry.generates)?;
        }
    }

    debug!("dry-run complete (no plan output)");
    Ok(())
}
