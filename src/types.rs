use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// What to do when a manager requires a layer that no manager produces.
///
/// - `Ignore`: skip the requirement (default). Layers such as participant
///   metadata are commonly listed as inputs without having a manager.
/// - `Error`: refuse to build the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLayerPolicy {
    #[default]
    Ignore,
    Error,
}

impl FromStr for UnknownLayerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(UnknownLayerPolicy::Ignore),
            "error" => Ok(UnknownLayerPolicy::Error),
            other => Err(format!(
                "invalid unknown_layers: {other} (expected \"ignore\" or \"error\")"
            )),
        }
    }
}

/// How the CLI prints a resolved plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One manager per line, in execution order.
    #[default]
    Text,
    /// Graphviz DOT of the manager dependency graph.
    Dot,
}
