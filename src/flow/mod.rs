//! Flow networks and min-cost max-flow.
//!
//! `FlowGraph` is an insertion-ordered directed graph whose edges carry a
//! capacity and a per-unit cost. `MinCostFlowSolver` computes a maximum
//! flow of minimum total cost with successive shortest augmenting paths.
//!
//! # Determinism
//!
//! Nodes, edges and residual arcs are visited in insertion order, and a
//! label is only replaced by a strictly cheaper one. Identical graphs
//! therefore yield identical flows, including the choice between
//! equal-cost paths.
//!
//! # References
//!
//! - Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 9 (Successive Shortest Paths)
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 24.1 (Bellman-Ford)

mod graph;
mod solver;

pub use graph::{Edge, FlowGraph, NodeId, MAX_CAPACITY};
pub use solver::{EdgeFlow, FlowOutcome, FlowResult, MinCostFlowSolver};

use thiserror::Error;

/// Errors raised while building or solving a flow network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// An edge is malformed (e.g. an empty endpoint id).
    #[error("invalid edge {from:?} -> {to:?}: {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        reason: String,
    },
    /// An edge violates capacity or cost bounds.
    #[error("edge {from} -> {to} violates constraints: {reason}")]
    Constraint {
        from: String,
        to: String,
        reason: String,
    },
    /// The source or sink is not part of the graph.
    #[error("terminal node '{0}' is not in the graph")]
    MissingTerminal(String),
    /// The residual graph contains a negative-cost cycle.
    #[error("negative-cost cycle reachable from '{0}'")]
    NegativeCycle(String),
}
