// src/dag/dot.rs

//! Interop with `petgraph`, mainly for Graphviz output.

use std::fmt::Display;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::dag::graph::DependencyGraph;

/// Copy a dependency graph into a `petgraph` directed graph.
///
/// Every created node is included (members or not), and node indices match
/// [`NodeId::index`](crate::dag::NodeId::index). Edge direction is
/// dependency -> dependent, i.e. the direction in which work flows.
pub fn to_petgraph<T>(graph: &DependencyGraph<T>) -> DiGraph<&T, ()> {
    let mut out = DiGraph::with_capacity(graph.len(), 0);

    for node in graph.iter() {
        out.add_node(node.provider());
    }

    for node in graph.iter() {
        let to = NodeIndex::new(node.id().index());
        for dep in node.dependencies() {
            out.add_edge(NodeIndex::new(dep.index()), to, ());
        }
    }

    out
}

/// Render the graph in Graphviz DOT format, labelling nodes by provider.
pub fn to_dot<T: Display>(graph: &DependencyGraph<T>) -> String {
    // `Dot` wants displayable edge weights even when labels are off.
    let pg = to_petgraph(graph).map(|_, node| *node, |_, _| "");
    format!("{}", Dot::with_config(&pg, &[Config::EdgeNoLabel]))
}
