// src/config/model.rs

use serde::Deserialize;

use crate::layers::ManagerConfig;
use crate::types::UnknownLayerPolicy;

/// Pipeline file exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [config]
/// unknown_layers = "ignore"
///
/// [[manager]]
/// layer = "word"
///
/// [[manager]]
/// layer = "orthography"
/// implementation = "Orth Standardizer"
/// requires = ["word"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All `[[manager]]` entries, in file order.
    #[serde(default)]
    pub manager: Vec<ManagerEntry>,
}

/// A validated pipeline file.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `config::validate`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub manager: Vec<ManagerEntry>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, manager: Vec<ManagerEntry>) -> Self {
        Self { config, manager }
    }

    /// Manager configurations in file order, ready for a `LayerPlan`.
    pub fn to_manager_configs(&self) -> Vec<ManagerConfig<String>> {
        self.manager.iter().map(ManagerEntry::to_manager_config).collect()
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// `"ignore"` (default) or `"error"`.
    ///
    /// Controls what happens when a manager requires a layer that no
    /// `[[manager]]` entry produces.
    #[serde(default)]
    pub unknown_layers: UnknownLayerPolicy,
}

/// One `[[manager]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerEntry {
    /// Layer this manager is responsible for.
    pub layer: String,

    /// Display name; defaults to the layer id.
    #[serde(default)]
    pub name: Option<String>,

    /// Auxiliary slot. Omit for the layer's primary manager.
    #[serde(default)]
    pub auxiliary: Option<u32>,

    /// Free-form implementation label (annotator name, tool, ...).
    #[serde(default)]
    pub implementation: Option<String>,

    /// Layers that must be complete before this manager runs.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Extra layers this manager writes besides its own.
    #[serde(default)]
    pub generates: Vec<String>,
}

impl ManagerEntry {
    /// Effective display name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.layer)
    }

    pub fn to_manager_config(&self) -> ManagerConfig<String> {
        let mut config = ManagerConfig::new(self.display_name(), self.layer.clone())
            .with_requires(self.requires.iter().cloned())
            .with_generates(self.generates.iter().cloned());
        config.auxiliary = self.auxiliary;
        config.implementation = self.implementation.clone();
        config
    }
}
