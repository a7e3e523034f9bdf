//! Flow network representation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::FlowError;

/// Opaque node identifier.
pub type NodeId = String;

/// Largest capacity accepted by the solver.
///
/// Anything above is treated as unbounded, which min-cost flow cannot handle.
pub const MAX_CAPACITY: i64 = i64::MAX / 4;

/// A directed edge with capacity and per-unit cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Tail node.
    pub from: NodeId,
    /// Head node.
    pub to: NodeId,
    /// Maximum flow on this edge.
    pub capacity: i64,
    /// Cost per unit of flow (may be negative).
    pub cost: f64,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, capacity: i64, cost: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            capacity,
            cost,
        }
    }
}

/// A directed flow network.
///
/// Nodes are created implicitly by the edges that mention them. Both nodes
/// and edges keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    /// Edge indices per node index, in insertion order.
    outgoing: Vec<Vec<usize>>,
}

impl FlowGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from edges, in order.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Result<Self, FlowError> {
        let mut graph = Self::new();
        graph.bulk_add_edges(edges)?;
        Ok(graph)
    }

    /// Adds an edge and returns its index.
    ///
    /// Capacity and cost are checked by the solver, not here.
    pub fn add_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        capacity: i64,
        cost: f64,
    ) -> Result<usize, FlowError> {
        self.push(Edge::new(from, to, capacity, cost))
    }

    /// Adds every edge in order. Stops at the first malformed edge.
    pub fn bulk_add_edges(
        &mut self,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<(), FlowError> {
        for edge in edges {
            self.push(edge)?;
        }
        Ok(())
    }

    fn push(&mut self, edge: Edge) -> Result<usize, FlowError> {
        if edge.from.is_empty() || edge.to.is_empty() {
            return Err(FlowError::InvalidEdge {
                from: edge.from,
                to: edge.to,
                reason: "endpoint id is empty".into(),
            });
        }
        let from = self.intern(&edge.from);
        self.intern(&edge.to);
        let idx = self.edges.len();
        self.outgoing[from].push(idx);
        self.edges.push(edge);
        Ok(idx)
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), i);
        self.outgoing.push(Vec::new());
        i
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of a node in insertion order.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, idx: usize) -> Option<&Edge> {
        self.edges.get(idx)
    }

    /// Outgoing edges of a node, in insertion order.
    pub fn outgoing(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.index
            .get(id)
            .into_iter()
            .flat_map(|&i| self.outgoing[i].iter().map(|&e| &self.edges[e]))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let g = FlowGraph::new();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert!(!g.contains_node("a"));
        assert_eq!(g.outgoing("a").count(), 0);
    }

    #[test]
    fn test_add_edge_creates_nodes_in_order() {
        let mut g = FlowGraph::new();
        g.add_edge("s", "a", 1, 1.0).unwrap();
        g.add_edge("a", "t", 1, 2.0).unwrap();
        g.add_edge("s", "b", 3, 0.5).unwrap();

        assert_eq!(g.node_ids(), &["s", "a", "t", "b"]);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.node_index("t"), Some(2));
        let targets: Vec<&str> = g.outgoing("s").map(|e| e.to.as_str()).collect();
        assert_eq!(targets, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let mut g = FlowGraph::new();
        let err = g.add_edge("", "a", 1, 1.0).unwrap_err();
        assert!(matches!(err, FlowError::InvalidEdge { .. }));
        assert!(g.add_edge("a", "", 1, 1.0).is_err());
        assert!(g.is_empty());
    }

    #[test]
    fn test_from_edges_preserves_order() {
        let edges = vec![
            Edge::new("1", "2", 1, 1.0),
            Edge::new("2", "3", 1, 1.0),
            Edge::new("2", "4", 1, 2.0),
        ];
        let g = FlowGraph::from_edges(edges.clone()).unwrap();
        assert_eq!(g.edges(), edges.as_slice());
        assert_eq!(g.edge(2).map(|e| e.to.as_str()), Some("4"));
    }

    #[test]
    fn test_bulk_add_stops_on_bad_edge() {
        let mut g = FlowGraph::new();
        let result = g.bulk_add_edges(vec![
            Edge::new("a", "b", 1, 1.0),
            Edge::new("b", "", 1, 1.0),
        ]);
        assert!(result.is_err());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_parallel_edges_kept() {
        let mut g = FlowGraph::new();
        g.add_edge("a", "b", 1, 1.0).unwrap();
        g.add_edge("a", "b", 2, 3.0).unwrap();
        assert_eq!(g.outgoing("a").count(), 2);
        assert_eq!(g.node_count(), 2);
    }
}
