#![allow(dead_code)]

use agdeps::config::{ConfigFile, ConfigSection, ManagerEntry, RawConfigFile};
use agdeps::dag::{DependencyGraph, NodeId};
use agdeps::types::UnknownLayerPolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                manager: Vec::new(),
            },
        }
    }

    pub fn with_manager(mut self, entry: ManagerEntry) -> Self {
        self.config.manager.push(entry);
        self
    }

    pub fn unknown_layers(mut self, policy: UnknownLayerPolicy) -> Self {
        self.config.config.unknown_layers = policy;
        self
    }

    /// The unvalidated file, for tests that expect validation to fail.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ManagerEntry`.
pub struct ManagerEntryBuilder {
    entry: ManagerEntry,
}

impl ManagerEntryBuilder {
    pub fn new(layer: &str) -> Self {
        Self {
            entry: ManagerEntry {
                layer: layer.to_string(),
                name: None,
                auxiliary: None,
                implementation: None,
                requires: vec![],
                generates: vec![],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.entry.name = Some(name.to_string());
        self
    }

    pub fn auxiliary(mut self, slot: u32) -> Self {
        self.entry.auxiliary = Some(slot);
        self
    }

    pub fn implementation(mut self, implementation: &str) -> Self {
        self.entry.implementation = Some(implementation.to_string());
        self
    }

    pub fn requires(mut self, layer: &str) -> Self {
        self.entry.requires.push(layer.to_string());
        self
    }

    pub fn generates(mut self, layer: &str) -> Self {
        self.entry.generates.push(layer.to_string());
        self
    }

    pub fn build(self) -> ManagerEntry {
        self.entry
    }
}

/// Insert one member node per provider, in order.
pub fn insert_all<T: Clone>(graph: &mut DependencyGraph<T>, providers: &[T]) -> Vec<NodeId> {
    providers.iter().cloned().map(|p| graph.insert(p)).collect()
}

/// The five-node graph used throughout the resolver tests:
/// a→b, a→d, b→c, b→e, c→d, c→e (`x→y` meaning x depends on y).
///
/// Each provider is its letter repeated `stem` times, so 1 gives a..e and 2
/// gives aa..ee. Returns the ids of a, b, c, d, e.
pub fn five_node_graph(graph: &mut DependencyGraph<String>, stem: usize) -> [NodeId; 5] {
    let name = |c: char| std::iter::repeat_n(c, stem).collect::<String>();
    let a = graph.insert(name('a'));
    let b = graph.insert(name('b'));
    let c = graph.insert(name('c'));
    let d = graph.insert(name('d'));
    let e = graph.insert(name('e'));

    graph.depends_on(a, b);
    graph.depends_on(a, d);
    graph.depends_on(b, c);
    graph.depends_on(b, e);
    graph.depends_on(c, d);
    graph.depends_on(c, e);

    [a, b, c, d, e]
}
