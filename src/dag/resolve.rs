// src/dag/resolve.rs

//! Depth-first topological sort with three-colour marking.
//!
//! The traversal is iterative: each stack frame remembers which dependency
//! of its node to look at next, which reproduces the visiting order of the
//! obvious recursive formulation without its stack-depth limit.

use thiserror::Error;
use tracing::trace;

use crate::dag::node::{Node, NodeId};

/// Per-resolution colour of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Unvisited,
    /// On the current DFS path; meeting it again means a cycle.
    Visiting,
    /// Emitted into the output.
    Visited,
}

/// A dependency cycle was reachable from the graph's members.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("circular dependency detected at node {node}")]
pub struct CircularDependency {
    /// The node whose declared dependency closes the loop.
    pub node: NodeId,
    /// Nodes fully resolved before the cycle was hit, in emission order.
    pub resolved: Vec<NodeId>,
}

struct Frame {
    node: NodeId,
    next_dep: usize,
}

/// One resolution pass over a node arena.
pub(crate) struct Resolver<'a, T> {
    nodes: &'a [Node<T>],
    state: Vec<VisitState>,
    output: Vec<NodeId>,
    stack: Vec<Frame>,
}

impl<'a, T> Resolver<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>]) -> Self {
        Self {
            nodes,
            state: vec![VisitState::Unvisited; nodes.len()],
            output: Vec::with_capacity(nodes.len()),
            stack: Vec::new(),
        }
    }

    /// Visit every root in order and return the accumulated resolution.
    pub(crate) fn run(mut self, roots: &[NodeId]) -> Result<Vec<NodeId>, CircularDependency> {
        for &root in roots {
            if self.state[root.0] == VisitState::Visited {
                continue;
            }
            if let Err(node) = self.visit(root) {
                return Err(CircularDependency {
                    node,
                    resolved: self.output,
                });
            }
        }
        Ok(self.output)
    }

    fn enter(&mut self, node: NodeId) {
        trace!(node = %node, "visiting");
        self.state[node.0] = VisitState::Visiting;
        self.stack.push(Frame { node, next_dep: 0 });
    }

    /// Resolve `root` and everything it depends on. On a cycle, returns the
    /// node whose dependency re-entered the current path.
    fn visit(&mut self, root: NodeId) -> Result<(), NodeId> {
        let nodes = self.nodes;
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            let node = frame.node;
            let deps = nodes[node.0].dependencies();

            if frame.next_dep < deps.len() {
                let dep = deps[frame.next_dep];
                frame.next_dep += 1;

                match self.state[dep.0] {
                    VisitState::Visited => {}
                    VisitState::Visiting => {
                        trace!(node = %node, dependency = %dep, "dependency is on the current path");
                        return Err(node);
                    }
                    VisitState::Unvisited => self.enter(dep),
                }
            } else {
                self.stack.pop();
                self.state[node.0] = VisitState::Visited;
                self.output.push(node);
            }
        }

        Ok(())
    }
}
