// src/layers/manager.rs

use std::collections::BTreeSet;
use std::fmt;

/// One layer-manager (annotator) configuration.
///
/// A manager is the primary producer of `layer` unless `auxiliary` is set, in
/// which case it runs after the managers declared before it for the same
/// layer. It may also produce further layers (`generates`) and needs every
/// layer in `requires` to be complete before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig<L> {
    /// Human-readable layer name used in output.
    pub name: String,
    pub layer: L,
    /// Auxiliary slot; `None` for the primary manager.
    pub auxiliary: Option<u32>,
    /// Implementation label, e.g. the annotator's class name.
    pub implementation: Option<String>,
    /// Input layers.
    pub requires: BTreeSet<L>,
    /// Output layers. Always contains `layer`.
    pub generates: BTreeSet<L>,
}

impl<L: Ord + Clone> ManagerConfig<L> {
    pub fn new(name: impl Into<String>, layer: L) -> Self {
        let mut generates = BTreeSet::new();
        generates.insert(layer.clone());
        Self {
            name: name.into(),
            layer,
            auxiliary: None,
            implementation: None,
            requires: BTreeSet::new(),
            generates,
        }
    }

    pub fn with_auxiliary(mut self, slot: u32) -> Self {
        self.auxiliary = Some(slot);
        self
    }

    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = Some(implementation.into());
        self
    }

    pub fn with_requires<I: IntoIterator<Item = L>>(mut self, layers: I) -> Self {
        self.requires.extend(layers);
        self
    }

    pub fn with_generates<I: IntoIterator<Item = L>>(mut self, layers: I) -> Self {
        self.generates.extend(layers);
        self
    }

    pub fn is_auxiliary(&self) -> bool {
        self.auxiliary.is_some()
    }
}

impl<L> fmt::Display for ManagerConfig<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(slot) = self.auxiliary {
            write!(f, " (aux {slot})")?;
        }
        if let Some(ref implementation) = self.implementation {
            write!(f, " [{implementation}]")?;
        }
        Ok(())
    }
}
