// src/dag/graph.rs

use std::ops::Index;

use tracing::{debug, warn};

use crate::dag::node::{Node, NodeId};
use crate::dag::resolve::{CircularDependency, Resolver};

/// Generic dependency graph over opaque providers.
///
/// Nodes live in an arena owned by the graph and are referred to by
/// [`NodeId`]. A node can be *created* (so that edges can point at it) without
/// being *added*; only added nodes drive the top-level resolution order, but
/// anything reachable through dependency edges is still resolved.
///
/// ```
/// use agdeps::dag::DependencyGraph;
///
/// let mut g = DependencyGraph::new();
/// let a = g.insert("a");
/// let b = g.insert("b");
/// g.depends_on(a, b);
///
/// let order: Vec<_> = g.resolve().unwrap().iter().map(|n| *n.provider()).collect();
/// assert_eq!(order, ["b", "a"]);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    /// Every node ever created, indexed by `NodeId`.
    nodes: Vec<Node<T>>,
    /// Members in `add()` order.
    order: Vec<NodeId>,
    /// `members[id]` is true once `id` has been added.
    members: Vec<bool>,
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DependencyGraph<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            order: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Create a node wrapping `provider` with no edges.
    ///
    /// The node is not yet a member of the resolution order; see [`add`](Self::add).
    pub fn node(&mut self, provider: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, provider));
        self.members.push(false);
        id
    }

    /// Append a created node to the resolution order and return it.
    ///
    /// Adding a node twice has no effect.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn add(&mut self, id: NodeId) -> NodeId {
        if self.members[id.0] {
            debug!(node = %id, "node already added to graph; ignoring");
            return id;
        }
        self.members[id.0] = true;
        self.order.push(id);
        id
    }

    /// Create a node and add it in one step.
    pub fn insert(&mut self, provider: T) -> NodeId {
        let id = self.node(provider);
        self.add(id)
    }

    /// Declare that `node` must be resolved after `on`.
    ///
    /// Both edge directions are recorded. Declaring the same edge twice has no
    /// additional effect and returns `false`. A self-dependency is accepted
    /// here and reported as a cycle by [`resolve`](Self::resolve).
    ///
    /// # Panics
    ///
    /// Panics if either id was not produced by this graph.
    pub fn depends_on(&mut self, node: NodeId, on: NodeId) -> bool {
        // Check both ids before mutating anything.
        assert!(
            node.0 < self.nodes.len() && on.0 < self.nodes.len(),
            "node id out of range for this graph"
        );

        if !self.nodes[node.0].push_dependency(on) {
            return false;
        }
        self.nodes[on.0].push_dependent(node);
        true
    }

    /// Number of nodes created in this graph (members or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` has been added to the resolution order.
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.get(id.0).copied().unwrap_or(false)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    pub fn provider(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).map(Node::provider)
    }

    pub fn provider_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).map(Node::provider_mut)
    }

    /// Members in the order they were added.
    pub fn members(&self) -> &[NodeId] {
        &self.order
    }

    /// Member nodes in the order they were added.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.order.iter().map(|id| &self.nodes[id.0])
    }

    /// All created nodes in creation order, members or not.
    pub fn iter(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.iter()
    }

    /// Resolve the graph into dependency order, returning node handles.
    ///
    /// Every node reachable from a member appears exactly once, after all of
    /// its dependencies. Fails if a cycle is reachable from any member.
    pub fn resolve_ids(&self) -> Result<Vec<NodeId>, CircularDependency> {
        debug!(
            nodes = self.nodes.len(),
            members = self.order.len(),
            "resolving dependency graph"
        );

        match Resolver::new(&self.nodes).run(&self.order) {
            Ok(resolved) => {
                debug!(resolved = resolved.len(), "dependency graph resolved");
                Ok(resolved)
            }
            Err(err) => {
                warn!(
                    node = %err.node,
                    resolved_before_cycle = err.resolved.len(),
                    "circular dependency detected"
                );
                Err(err)
            }
        }
    }

    /// Resolve the graph into dependency order.
    ///
    /// Resolution state is local to each call, so a graph can be resolved any
    /// number of times and always yields the same sequence.
    pub fn resolve(&self) -> Result<Vec<&Node<T>>, CircularDependency> {
        let ids = self.resolve_ids()?;
        Ok(ids.into_iter().map(|id| &self.nodes[id.0]).collect())
    }

    /// Consume the graph and return its providers in dependency order.
    ///
    /// Created nodes that are unreachable from every member are dropped.
    pub fn into_resolved(self) -> Result<Vec<T>, CircularDependency> {
        let ids = self.resolve_ids()?;
        Ok(self.into_providers(&ids))
    }

    /// Consume the graph and return the providers of `order`, in that order.
    ///
    /// Ids repeated in `order` yield their provider only once.
    pub fn into_providers(self, order: &[NodeId]) -> Vec<T> {
        let mut slots: Vec<Option<T>> = self
            .nodes
            .into_iter()
            .map(|node| Some(node.into_provider()))
            .collect();

        order
            .iter()
            .filter_map(|id| slots[id.0].take())
            .collect()
    }
}

impl<T> Index<NodeId> for DependencyGraph<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}
