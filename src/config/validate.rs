// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AgdepsError, Result};
use crate::layers::LayerPlan;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AgdepsError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.manager))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_managers(cfg)?;
    validate_manager_entries(cfg)?;
    validate_plan(cfg)?;
    Ok(())
}

fn ensure_has_managers(cfg: &RawConfigFile) -> Result<()> {
    if cfg.manager.is_empty() {
        return Err(AgdepsError::ConfigError(
            "config must contain at least one [[manager]] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_manager_entries(cfg: &RawConfigFile) -> Result<()> {
    let mut slots: HashSet<(&str, Option<u32>)> = HashSet::new();
    let mut with_auxiliary: HashSet<&str> = HashSet::new();

    for (position, entry) in cfg.manager.iter().enumerate() {
        if entry.layer.trim().is_empty() {
            return Err(AgdepsError::ConfigError(format!(
                "[[manager]] #{} has an empty `layer`",
                position + 1
            )));
        }

        if !slots.insert((entry.layer.as_str(), entry.auxiliary)) {
            let slot = match entry.auxiliary {
                Some(n) => format!("auxiliary slot {n}"),
                None => "primary slot".to_string(),
            };
            return Err(AgdepsError::ConfigError(format!(
                "layer '{}' has more than one manager in its {}",
                entry.layer, slot
            )));
        }

        // Managers of a layer run in declaration order.
        match entry.auxiliary {
            Some(_) => {
                with_auxiliary.insert(entry.layer.as_str());
            }
            None if with_auxiliary.contains(entry.layer.as_str()) => {
                return Err(AgdepsError::ConfigError(format!(
                    "primary manager '{}' of layer '{}' must be declared before its auxiliaries",
                    entry.display_name(),
                    entry.layer
                )));
            }
            None => {}
        }

        if entry.requires.iter().any(|layer| *layer == entry.layer) {
            return Err(AgdepsError::ConfigError(format!(
                "manager '{}' cannot require its own layer '{}'",
                entry.display_name(),
                entry.layer
            )));
        }
    }
    Ok(())
}

fn validate_plan(cfg: &RawConfigFile) -> Result<()> {
    // Resolving catches both unknown layers (when configured to) and cycles
    // between managers.
    let configs = cfg.manager.iter().map(|entry| entry.to_manager_config());
    LayerPlan::from_configs(configs, cfg.config.unknown_layers).resolve()?;
    Ok(())
}
