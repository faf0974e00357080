// src/dag/mod.rs

//! Generic dependency graph and its resolution.
//!
//! - [`node`] holds the vertex type and its [`NodeId`] handle.
//! - [`graph`] owns the node arena, wires edges and drives resolution.
//! - [`resolve`] implements the depth-first topological sort and cycle
//!   detection.
//! - [`dot`] exports to `petgraph` / Graphviz.

pub mod dot;
pub mod graph;
pub mod node;
pub mod resolve;

pub use graph::DependencyGraph;
pub use node::{Node, NodeId};
pub use resolve::{CircularDependency, VisitState};
