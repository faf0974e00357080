// src/dag/node.rs

//! Graph vertices and their handles.

use std::fmt;

/// Handle to a node inside a [`DependencyGraph`](crate::dag::DependencyGraph).
///
/// Node identity is the handle, never the payload: two nodes wrapping equal
/// providers are still distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the graph's arena (creation order).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex wrapping a caller-supplied provider.
///
/// Edges are only created through
/// [`DependencyGraph::depends_on`](crate::dag::DependencyGraph::depends_on),
/// which keeps both directions in sync.
#[derive(Debug, Clone)]
pub struct Node<T> {
    id: NodeId,
    provider: T,
    /// Nodes that must be resolved before this one, in declaration order.
    dependencies: Vec<NodeId>,
    /// Nodes that declared a dependency on this one (non-owning).
    dependents: Vec<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(id: NodeId, provider: T) -> Self {
        Self {
            id,
            provider,
            dependencies: Vec::new(),
            dependents: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The wrapped payload.
    pub fn provider(&self) -> &T {
        &self.provider
    }

    pub(crate) fn provider_mut(&mut self) -> &mut T {
        &mut self.provider
    }

    pub(crate) fn into_provider(self) -> T {
        self.provider
    }

    /// Direct dependencies, in the order they were declared.
    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    /// Direct dependents, in the order they declared their dependency.
    pub fn dependents(&self) -> &[NodeId] {
        &self.dependents
    }

    /// Whether `other` is a direct dependency of this node.
    pub fn depends_directly_on(&self, other: NodeId) -> bool {
        self.dependencies.contains(&other)
    }

    /// Record a forward edge. Returns `false` if it was already present.
    pub(crate) fn push_dependency(&mut self, on: NodeId) -> bool {
        if self.dependencies.contains(&on) {
            return false;
        }
        self.dependencies.push(on);
        true
    }

    pub(crate) fn push_dependent(&mut self, by: NodeId) {
        if !self.dependents.contains(&by) {
            self.dependents.push(by);
        }
    }
}
