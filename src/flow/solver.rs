//! Min-cost max-flow via successive shortest augmenting paths.
//!
//! # Algorithm
//!
//! 1. Validate every edge (capacity in `1..=MAX_CAPACITY`, finite cost) and
//!    each node's summed in and out capacity (must fit in `i64`).
//! 2. Build a residual graph: each edge yields a forward arc with its
//!    capacity and a paired backward arc with zero capacity and negated cost.
//! 3. Find the cheapest source→sink path over arcs with positive residual
//!    capacity (FIFO label-correcting search; backward arcs may be negative).
//! 4. Push the path bottleneck, decrementing forward and incrementing
//!    backward residuals. Repeat until the sink is unreachable.
//! 5. The flow on each edge is the residual capacity of its backward arc.
//!
//! # Complexity
//! O(F * V * E) where F = total flow pushed.
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 9.7

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{FlowError, FlowGraph, NodeId, MAX_CAPACITY};

/// Costs closer than this are considered equal when relaxing labels.
const COST_EPSILON: f64 = 1e-9;

/// Result of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// At least one edge carries flow.
    Solved(FlowResult),
    /// The graph is valid but no flow reaches the sink.
    NoFeasibleFlow,
}

impl FlowOutcome {
    /// The solved flow, if any.
    pub fn solved(self) -> Option<FlowResult> {
        match self {
            FlowOutcome::Solved(result) => Some(result),
            FlowOutcome::NoFeasibleFlow => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, FlowOutcome::Solved(_))
    }
}

/// Flow assigned to one edge of the input graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: i64,
    pub cost: f64,
    pub flow: i64,
}

/// A min-cost max-flow solution.
///
/// Edges appear in the same order as in the solved graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    source: NodeId,
    sink: NodeId,
    edges: Vec<EdgeFlow>,
    augmentations: usize,
}

impl FlowResult {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sink(&self) -> &str {
        &self.sink
    }

    /// Per-edge flows, in graph order.
    pub fn edges(&self) -> &[EdgeFlow] {
        &self.edges
    }

    /// Edges carrying positive flow.
    pub fn positive_edges(&self) -> impl Iterator<Item = &EdgeFlow> {
        self.edges.iter().filter(|e| e.flow > 0)
    }

    /// Flow leaving `node`.
    pub fn outflow(&self, node: &str) -> i64 {
        self.edges
            .iter()
            .filter(|e| e.from == node)
            .map(|e| e.flow)
            .sum()
    }

    /// Flow entering `node`.
    pub fn inflow(&self, node: &str) -> i64 {
        self.edges
            .iter()
            .filter(|e| e.to == node)
            .map(|e| e.flow)
            .sum()
    }

    /// Total flow on edges `from -> to`.
    pub fn flow_on(&self, from: &str, to: &str) -> i64 {
        self.edges
            .iter()
            .filter(|e| e.from == from && e.to == to)
            .map(|e| e.flow)
            .sum()
    }

    /// Net flow out of the source (the max-flow value).
    pub fn total_flow(&self) -> i64 {
        self.outflow(&self.source) - self.inflow(&self.source)
    }

    /// Sum of `flow * cost` over all edges.
    pub fn total_cost(&self) -> f64 {
        self.edges.iter().map(|e| e.flow as f64 * e.cost).sum()
    }

    /// Number of augmenting paths used.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }
}

#[derive(Debug, Clone, Copy)]
struct Arc {
    tail: usize,
    head: usize,
    residual: i64,
    cost: f64,
}

/// Residual network. Arc `2i` is the forward arc of edge `i`, `2i + 1` its backward arc.
struct Residual {
    arcs: Vec<Arc>,
    adjacency: Vec<Vec<usize>>,
}

impl Residual {
    fn build(graph: &FlowGraph) -> Self {
        let mut arcs = Vec::with_capacity(graph.edge_count() * 2);
        let mut adjacency = vec![Vec::new(); graph.node_count()];

        for edge in graph.edges() {
            // endpoints were interned when the edge was added
            let (Some(u), Some(v)) = (graph.node_index(&edge.from), graph.node_index(&edge.to))
            else {
                continue;
            };
            adjacency[u].push(arcs.len());
            arcs.push(Arc {
                tail: u,
                head: v,
                residual: edge.capacity,
                cost: edge.cost,
            });
            adjacency[v].push(arcs.len());
            arcs.push(Arc {
                tail: v,
                head: u,
                residual: 0,
                cost: -edge.cost,
            });
        }

        Self { arcs, adjacency }
    }

    /// Cheapest path from `s` to `t` as a list of arc indices.
    fn shortest_path(
        &self,
        s: usize,
        t: usize,
        source: &str,
    ) -> Result<Option<Vec<usize>>, FlowError> {
        let n = self.adjacency.len();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut in_queue = vec![false; n];
        let mut enqueued = vec![0usize; n];
        let mut queue = VecDeque::new();

        dist[s] = 0.0;
        queue.push_back(s);
        in_queue[s] = true;

        while let Some(u) = queue.pop_front() {
            in_queue[u] = false;
            for &a in &self.adjacency[u] {
                let arc = &self.arcs[a];
                if arc.residual <= 0 {
                    continue;
                }
                let candidate = dist[u] + arc.cost;
                if candidate + COST_EPSILON < dist[arc.head] {
                    dist[arc.head] = candidate;
                    prev[arc.head] = Some(a);
                    if !in_queue[arc.head] {
                        enqueued[arc.head] += 1;
                        if enqueued[arc.head] > n {
                            return Err(FlowError::NegativeCycle(source.to_string()));
                        }
                        in_queue[arc.head] = true;
                        queue.push_back(arc.head);
                    }
                }
            }
        }

        if dist[t].is_infinite() {
            return Ok(None);
        }

        let mut path = Vec::new();
        let mut node = t;
        while let Some(a) = prev[node] {
            path.push(a);
            if path.len() > n {
                return Err(FlowError::NegativeCycle(source.to_string()));
            }
            node = self.arcs[a].tail;
        }
        path.reverse();
        Ok(Some(path))
    }

    /// Pushes the bottleneck along `path` and returns the amount pushed.
    fn augment(&mut self, path: &[usize]) -> i64 {
        let bottleneck = path
            .iter()
            .map(|&a| self.arcs[a].residual)
            .min()
            .unwrap_or(0);
        for &a in path {
            self.arcs[a].residual -= bottleneck;
            self.arcs[a ^ 1].residual += bottleneck;
        }
        bottleneck
    }

    /// Flow on graph edge `i`.
    fn edge_flow(&self, i: usize) -> i64 {
        self.arcs[2 * i + 1].residual
    }
}

/// Successive-shortest-path min-cost max-flow solver.
///
/// # Example
/// ```
/// use u_course::flow::{FlowGraph, MinCostFlowSolver};
///
/// let mut graph = FlowGraph::new();
/// graph.add_edge("s", "a", 1, 1.0).unwrap();
/// graph.add_edge("a", "t", 1, 1.0).unwrap();
///
/// let result = MinCostFlowSolver::new()
///     .solve(&graph, "s", "t")
///     .unwrap()
///     .solved()
///     .unwrap();
/// assert_eq!(result.total_flow(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinCostFlowSolver;

impl MinCostFlowSolver {
    pub fn new() -> Self {
        Self
    }

    /// Computes a maximum flow of minimum cost from `source` to `sink`.
    ///
    /// Every edge is validated before solving; a single bad edge rejects
    /// the whole graph.
    pub fn solve(
        &self,
        graph: &FlowGraph,
        source: &str,
        sink: &str,
    ) -> Result<FlowOutcome, FlowError> {
        let s = graph
            .node_index(source)
            .ok_or_else(|| FlowError::MissingTerminal(source.to_string()))?;
        let t = graph
            .node_index(sink)
            .ok_or_else(|| FlowError::MissingTerminal(sink.to_string()))?;
        if s == t {
            return Err(FlowError::InvalidEdge {
                from: source.to_string(),
                to: sink.to_string(),
                reason: "source and sink are the same node".into(),
            });
        }
        validate_edges(graph)?;

        let mut residual = Residual::build(graph);
        let mut augmentations = 0;
        let mut pushed = 0;
        while let Some(path) = residual.shortest_path(s, t, source)? {
            pushed += residual.augment(&path);
            augmentations += 1;
            tracing::trace!(augmentations, pushed, path_len = path.len(), "augmented");
        }

        let edges: Vec<EdgeFlow> = graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, e)| EdgeFlow {
                from: e.from.clone(),
                to: e.to.clone(),
                capacity: e.capacity,
                cost: e.cost,
                flow: residual.edge_flow(i),
            })
            .collect();

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            augmentations,
            flow = pushed,
            "min-cost flow solved"
        );

        if !edges.iter().any(|e| e.flow > 0) {
            return Ok(FlowOutcome::NoFeasibleFlow);
        }

        Ok(FlowOutcome::Solved(FlowResult {
            source: source.to_string(),
            sink: sink.to_string(),
            edges,
            augmentations,
        }))
    }
}

/// Checks every edge, and that no node's total in or out capacity leaves `i64`.
///
/// Any flow value, per node or in total, is then representable.
fn validate_edges(graph: &FlowGraph) -> Result<(), FlowError> {
    let mut outgoing = vec![0i64; graph.node_count()];
    let mut incoming = vec![0i64; graph.node_count()];
    for edge in graph.edges() {
        let violation = |reason: String| FlowError::Constraint {
            from: edge.from.clone(),
            to: edge.to.clone(),
            reason,
        };
        if edge.capacity <= 0 {
            return Err(violation(format!("capacity {} is not positive", edge.capacity)));
        }
        if edge.capacity > MAX_CAPACITY {
            return Err(violation(format!("capacity {} is unbounded", edge.capacity)));
        }
        if !edge.cost.is_finite() {
            return Err(violation(format!("cost {} is not finite", edge.cost)));
        }
        let (Some(u), Some(v)) = (graph.node_index(&edge.from), graph.node_index(&edge.to))
        else {
            continue;
        };
        outgoing[u] = outgoing[u].checked_add(edge.capacity).ok_or_else(|| {
            violation(format!("total capacity leaving {} overflows", edge.from))
        })?;
        incoming[v] = incoming[v].checked_add(edge.capacity).ok_or_else(|| {
            violation(format!("total capacity entering {} overflows", edge.to))
        })?;
    }
    Ok(())
}
