//! Graph participants and the shared build context.
//!
//! Students and teachers contribute edges to one flow network per pass:
//!
//! ```text
//! @source -> student:<id> -> slot:<n> -> teacher:<id> -> @sink
//!                  \                                      ^
//!                   `-> @overflow -------------------------'
//! ```
//!
//! Teachers register slots first; students then link to every registered
//! slot they can attend. Unmatchable demand drains through `@overflow`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::MatchingError;
use crate::flow::{FlowError, FlowGraph, NodeId};
use crate::models::{Level, Student, Teacher, TimeSlot};

/// Source node of every matching graph.
pub const SOURCE_NODE: &str = "@source";
/// Sink node of every matching graph.
pub const SINK_NODE: &str = "@sink";
/// Node absorbing demand no slot can take.
pub const OVERFLOW_NODE: &str = "@overflow";
/// Capacity of the overflow -> sink edge.
pub const OVERFLOW_CAPACITY: i64 = 1_000_000;
/// Cost of the overflow -> sink edge.
pub const OVERFLOW_SINK_COST: f64 = 100.0;

/// A course slot offered by one teacher: `(teacher, level, schedule)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub teacher_id: String,
    pub level: Level,
    pub schedule: TimeSlot,
}

impl SlotKey {
    pub fn new(teacher_id: impl Into<String>, level: Level, schedule: TimeSlot) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            level,
            schedule,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.teacher_id, self.level, self.schedule)
    }
}

/// What a node of the matching graph stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Source,
    Sink,
    Overflow,
    Student(String),
    Teacher(String),
    Slot(SlotKey),
}

/// Maps node ids of a built graph back to participants and slots.
#[derive(Debug, Clone, Default)]
pub struct GraphLayout {
    kinds: HashMap<NodeId, NodeKind>,
    slots: Vec<(SlotKey, NodeId)>,
    students: Vec<String>,
    teachers: Vec<String>,
}

impl GraphLayout {
    pub fn kind(&self, node: &str) -> Option<&NodeKind> {
        self.kinds.get(node)
    }

    /// Registered slots, in registration order.
    pub fn slots(&self) -> impl Iterator<Item = (&SlotKey, &str)> {
        self.slots.iter().map(|(key, node)| (key, node.as_str()))
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Student ids, in registration order.
    pub fn student_ids(&self) -> &[String] {
        &self.students
    }

    /// Teacher ids, in registration order.
    pub fn teacher_ids(&self) -> &[String] {
        &self.teachers
    }
}

#[derive(Debug, Clone, Copy)]
enum EdgeCost {
    Fixed(f64),
    /// Resolved to the overflow bound when the builder finishes.
    Overflow,
}

#[derive(Debug, Clone)]
struct PendingEdge {
    from: NodeId,
    to: NodeId,
    capacity: i64,
    cost: EdgeCost,
}

/// Accumulates participant edges for one matching pass.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    edges: Vec<PendingEdge>,
    layout: GraphLayout,
    slot_nodes: HashMap<SlotKey, NodeId>,
    overflow_sink: bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        let mut layout = GraphLayout::default();
        layout.kinds.insert(SOURCE_NODE.into(), NodeKind::Source);
        layout.kinds.insert(SINK_NODE.into(), NodeKind::Sink);
        layout.kinds.insert(OVERFLOW_NODE.into(), NodeKind::Overflow);
        Self {
            edges: Vec::new(),
            layout,
            slot_nodes: HashMap::new(),
            overflow_sink: false,
        }
    }

    /// Registers a student node. Fails if the student is already registered.
    pub fn register_student(&mut self, id: &str) -> Result<NodeId, MatchingError> {
        let node = student_node(id);
        self.register(node.clone(), NodeKind::Student(id.to_string()))?;
        self.layout.students.push(id.to_string());
        Ok(node)
    }

    /// Registers a teacher node. Fails if the teacher is already registered.
    pub fn register_teacher(&mut self, id: &str) -> Result<NodeId, MatchingError> {
        let node = teacher_node(id);
        self.register(node.clone(), NodeKind::Teacher(id.to_string()))?;
        self.layout.teachers.push(id.to_string());
        Ok(node)
    }

    fn register(&mut self, node: NodeId, kind: NodeKind) -> Result<(), MatchingError> {
        if self.layout.kinds.contains_key(&node) {
            return Err(MatchingError::DuplicateParticipant(node));
        }
        self.layout.kinds.insert(node, kind);
        Ok(())
    }

    /// Registers a slot and returns its node id. Registering a key twice
    /// returns the existing node.
    pub fn register_slot(&mut self, key: SlotKey) -> NodeId {
        if let Some(node) = self.slot_nodes.get(&key) {
            return node.clone();
        }
        let node = format!("slot:{}", self.layout.slots.len());
        self.layout
            .kinds
            .insert(node.clone(), NodeKind::Slot(key.clone()));
        self.layout.slots.push((key.clone(), node.clone()));
        self.slot_nodes.insert(key, node.clone());
        node
    }

    /// Slots registered so far, in registration order.
    pub fn slots(&self) -> impl Iterator<Item = (&SlotKey, &str)> {
        self.layout.slots()
    }

    pub fn add_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        capacity: i64,
        cost: f64,
    ) {
        self.edges.push(PendingEdge {
            from: from.into(),
            to: to.into(),
            capacity,
            cost: EdgeCost::Fixed(cost),
        });
    }

    /// Adds `from -> @overflow`, priced at the overflow bound.
    pub fn add_overflow_edge(&mut self, from: impl Into<NodeId>, capacity: i64) {
        self.edges.push(PendingEdge {
            from: from.into(),
            to: OVERFLOW_NODE.into(),
            capacity,
            cost: EdgeCost::Overflow,
        });
    }

    /// Adds the single `@overflow -> @sink` edge.
    pub fn add_overflow_sink(&mut self) {
        if self.overflow_sink {
            return;
        }
        self.overflow_sink = true;
        self.add_edge(OVERFLOW_NODE, SINK_NODE, OVERFLOW_CAPACITY, OVERFLOW_SINK_COST);
    }

    /// Cost of a student -> overflow edge: one more than the total absolute
    /// cost of every edge not touching `@overflow`.
    ///
    /// Any path through real slots is cheaper than overflowing, so overflow
    /// only carries demand no slot can take.
    pub fn overflow_cost(&self) -> f64 {
        let real: f64 = self
            .edges
            .iter()
            .filter(|e| e.from != OVERFLOW_NODE && e.to != OVERFLOW_NODE)
            .filter_map(|e| match e.cost {
                EdgeCost::Fixed(cost) => Some(cost.abs()),
                EdgeCost::Overflow => None,
            })
            .sum();
        1.0 + real
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Materializes the graph and its layout.
    pub fn finish(self) -> Result<(FlowGraph, GraphLayout), FlowError> {
        let bound = self.overflow_cost();
        let mut graph = FlowGraph::new();
        for edge in self.edges {
            let cost = match edge.cost {
                EdgeCost::Fixed(cost) => cost,
                EdgeCost::Overflow => bound,
            };
            graph.add_edge(edge.from, edge.to, edge.capacity, cost)?;
        }
        Ok((graph, self.layout))
    }
}

pub fn student_node(id: &str) -> NodeId {
    format!("student:{id}")
}

pub fn teacher_node(id: &str) -> NodeId {
    format!("teacher:{id}")
}

/// Union of what a student cohort asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRequirements {
    /// Requested levels.
    pub levels: BTreeSet<Level>,
    /// Requested slots, widened by the pass tolerance.
    pub availability: BTreeSet<TimeSlot>,
}

impl StudentRequirements {
    pub fn collect<'a>(students: impl IntoIterator<Item = &'a Student>, tolerance: u32) -> Self {
        let mut requirements = Self::default();
        for student in students {
            requirements.levels.insert(student.level);
            requirements
                .availability
                .extend(student.availability_with_tolerance(tolerance));
        }
        requirements
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for crate::models::Student {}
    impl Sealed for crate::models::Teacher {}
}

/// An entity that contributes edges to a matching graph.
///
/// Implemented by [`Student`] and [`Teacher`] only.
pub trait GraphParticipant: private::Sealed {
    /// Pass input that shapes the edges.
    type Requirements: ?Sized;

    fn id(&self) -> &str;

    fn node_id(&self) -> NodeId;

    fn build_graph_edges(
        &self,
        builder: &mut GraphBuilder,
        course_size: u32,
        requirements: &Self::Requirements,
    ) -> Result<(), MatchingError>;
}

impl GraphParticipant for Student {
    /// Availability tolerance in hours.
    type Requirements = u32;

    fn id(&self) -> &str {
        &self.id
    }

    fn node_id(&self) -> NodeId {
        student_node(&self.id)
    }

    /// Adds `source -> student`, `student -> overflow` and one edge per
    /// registered slot at the student's level within `tolerance` hours of
    /// their availability. All carry the student's demand.
    fn build_graph_edges(
        &self,
        builder: &mut GraphBuilder,
        course_size: u32,
        tolerance: &u32,
    ) -> Result<(), MatchingError> {
        let node = builder.register_student(&self.id)?;
        let demand = i64::from(self.demand(course_size));
        let cost = f64::from(self.priority);

        builder.add_edge(SOURCE_NODE, node.clone(), demand, cost);
        builder.add_overflow_edge(node.clone(), demand);

        let targets: Vec<NodeId> = builder
            .slots()
            .filter(|(key, _)| {
                key.level == self.level && self.matches_with_tolerance(&key.schedule, *tolerance)
            })
            .map(|(_, slot)| slot.to_string())
            .collect();
        for slot in targets {
            builder.add_edge(node.clone(), slot, demand, cost);
        }
        Ok(())
    }
}

impl GraphParticipant for Teacher {
    type Requirements = StudentRequirements;

    fn id(&self) -> &str {
        &self.id
    }

    fn node_id(&self) -> NodeId {
        teacher_node(&self.id)
    }

    /// Adds `teacher -> sink` and registers a slot for every free schedule
    /// and level the cohort asks for, each draining into the teacher.
    ///
    /// A fully booked teacher contributes nothing.
    fn build_graph_edges(
        &self,
        builder: &mut GraphBuilder,
        course_size: u32,
        requirements: &StudentRequirements,
    ) -> Result<(), MatchingError> {
        if self.is_fully_booked() {
            return Ok(());
        }
        let node = builder.register_teacher(&self.id)?;
        let cost = f64::from(self.priority);
        let capacity = i64::from(self.remaining_courses()) * i64::from(course_size);
        builder.add_edge(node.clone(), SINK_NODE, capacity, cost);

        for schedule in self.free_slots() {
            if !requirements.availability.contains(schedule) {
                continue;
            }
            for level in &self.levels {
                if !requirements.levels.contains(level) {
                    continue;
                }
                let slot = builder.register_slot(SlotKey::new(self.id.clone(), *level, *schedule));
                builder.add_edge(slot, node.clone(), i64::from(course_size), cost);
            }
        }
        Ok(())
    }
}
