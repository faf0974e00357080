// src/layers/mod.rs

//! Ordering of annotation layer managers.
//!
//! A layer can have a primary manager and any number of auxiliary managers,
//! and a manager may produce layers besides its own (an aligner that also
//! writes the segment layer, say). [`LayerPlan`] turns those facts into
//! dependency edges and resolves the order in which managers must run.

pub mod manager;
pub mod plan;

pub use manager::ManagerConfig;
pub use plan::LayerPlan;
