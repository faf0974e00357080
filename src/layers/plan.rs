// src/layers/plan.rs

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use tracing::{debug, info};

use crate::dag::{CircularDependency, DependencyGraph, NodeId};
use crate::errors::{AgdepsError, Result};
use crate::layers::manager::ManagerConfig;
use crate::types::UnknownLayerPolicy;

/// Builds the manager dependency graph for a set of layer managers.
///
/// Managers are first *declared* one by one; each new manager for a layer
/// depends on the managers declared earlier for the same layer, so a layer's
/// managers run in declaration order. Pipeline files are validated to declare
/// the primary manager before its auxiliaries.
/// [`build`](Self::build) then adds the cross-layer edges:
///
/// - a manager depends on every manager of every layer it requires, and on
///   every manager that generates that layer;
/// - when a manager also generates some other layer, every manager of that
///   layer depends on it.
#[derive(Debug)]
pub struct LayerPlan<L> {
    graph: DependencyGraph<ManagerConfig<L>>,
    /// Layers in first-declaration order, each with its managers.
    layers: Vec<(L, Vec<NodeId>)>,
    /// Layer -> position in `layers`.
    index: HashMap<L, usize>,
    policy: UnknownLayerPolicy,
}

impl<L> LayerPlan<L>
where
    L: Clone + Eq + Hash + Ord + Display,
{
    pub fn new(policy: UnknownLayerPolicy) -> Self {
        Self {
            graph: DependencyGraph::new(),
            layers: Vec::new(),
            index: HashMap::new(),
            policy,
        }
    }

    /// Declare every config in order.
    pub fn from_configs<I>(configs: I, policy: UnknownLayerPolicy) -> Self
    where
        I: IntoIterator<Item = ManagerConfig<L>>,
    {
        let mut plan = Self::new(policy);
        for config in configs {
            plan.declare(config);
        }
        plan
    }

    /// Register a manager, ordering it after earlier managers of its layer.
    pub fn declare(&mut self, config: ManagerConfig<L>) -> NodeId {
        let layer = config.layer.clone();
        let id = self.graph.node(config);

        let slot = match self.index.get(&layer) {
            Some(&slot) => slot,
            None => {
                self.layers.push((layer.clone(), Vec::new()));
                self.index.insert(layer, self.layers.len() - 1);
                self.layers.len() - 1
            }
        };

        for &earlier in &self.layers[slot].1 {
            self.graph.depends_on(id, earlier);
        }
        self.layers[slot].1.push(id);

        debug!(
            manager = %self.graph[id].provider(),
            position = self.layers[slot].1.len(),
            "declared layer manager"
        );
        id
    }

    /// Managers declared so far for `layer`, in declaration order.
    pub fn managers_of(&self, layer: &L) -> &[NodeId] {
        self.index
            .get(layer)
            .map(|&slot| self.layers[slot].1.as_slice())
            .unwrap_or(&[])
    }

    /// Wire cross-layer edges and return the finished graph.
    ///
    /// Managers are added to the graph layer by layer, in the order their
    /// layers were first declared.
    pub fn build(self) -> Result<DependencyGraph<ManagerConfig<L>>> {
        let LayerPlan {
            mut graph,
            layers,
            index,
            policy,
        } = self;

        // Managers that write a layer other than their own, keyed by that layer.
        let mut generators: HashMap<L, Vec<NodeId>> = HashMap::new();
        for (layer, ids) in &layers {
            for &id in ids {
                for produced in graph[id].provider().generates.iter() {
                    if produced != layer {
                        generators.entry(produced.clone()).or_default().push(id);
                    }
                }
            }
        }

        for (layer, ids) in &layers {
            for &id in ids {
                graph.add(id);

                let (requires, generates) = {
                    let config = graph[id].provider();
                    (config.requires.clone(), config.generates.clone())
                };

                for needed in &requires {
                    let managers = index
                        .get(needed)
                        .map(|&slot| layers[slot].1.as_slice())
                        .unwrap_or(&[]);
                    let generated_by = generators.get(needed).map(Vec::as_slice).unwrap_or(&[]);

                    if managers.is_empty() && generated_by.is_empty() {
                        match policy {
                            UnknownLayerPolicy::Ignore => {
                                debug!(
                                    manager = %graph[id].provider(),
                                    layer = %needed,
                                    "required layer has no producer; ignoring"
                                );
                            }
                            UnknownLayerPolicy::Error => {
                                return Err(AgdepsError::UnknownLayer {
                                    manager: graph[id].provider().to_string(),
                                    layer: needed.to_string(),
                                });
                            }
                        }
                        continue;
                    }

                    for &on in managers.iter().chain(generated_by) {
                        graph.depends_on(id, on);
                    }
                }

                for produced in generates.iter().filter(|produced| *produced != layer) {
                    if let Some(&slot) = index.get(produced) {
                        for &dependent in &layers[slot].1 {
                            graph.depends_on(dependent, id);
                        }
                    }
                }
            }
        }

        Ok(graph)
    }

    /// Build the graph and return the managers in execution order.
    pub fn resolve(self) -> Result<Vec<ManagerConfig<L>>> {
        let graph = self.build()?;
        let ids = graph
            .resolve_ids()
            .map_err(|err| cycle_error(&graph, &err))?;
        let order = graph.into_providers(&ids);

        info!(managers = order.len(), "resolved layer manager order");
        Ok(order)
    }
}

/// Turn a resolver failure into an error that names the implicated manager.
fn cycle_error<L>(graph: &DependencyGraph<ManagerConfig<L>>, err: &CircularDependency) -> AgdepsError {
    let manager = graph
        .provider(err.node)
        .map(|config| config.to_string())
        .unwrap_or_else(|| err.node.to_string());
    AgdepsError::DagCycle(format!(
        "circular dependency detected at manager '{manager}'"
    ))
}
