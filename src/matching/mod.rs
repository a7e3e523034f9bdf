//! Student to course-slot matching.
//!
//! A pass builds one flow network from a student cohort and the teachers,
//! solves it with [`MinCostFlowSolver`](crate::flow::MinCostFlowSolver), and
//! reads the student edge flows back as assignment orders.
//!
//! # Costs
//!
//! Every real edge costs the participant's priority, so cheaper (lower
//! priority value) students and teachers are matched first. Overflow edges
//! cost more than any path through real slots; when seats run out, the
//! student with the worst priority is the one overflowed.
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 12.4 (Assignment Problems)

mod assigner;
mod participant;
mod translator;

pub use assigner::{Assigner, MatchOutcome};
pub use participant::{
    student_node, teacher_node, GraphBuilder, GraphLayout, GraphParticipant, NodeKind, SlotKey,
    StudentRequirements, OVERFLOW_CAPACITY, OVERFLOW_NODE, OVERFLOW_SINK_COST, SINK_NODE,
    SOURCE_NODE,
};
pub use translator::{AssignmentOrder, AssignmentOrders, FlowTranslator, OrderKey, TranslateError};

use crate::flow::FlowError;
use thiserror::Error;

/// Errors raised by a matching pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchingError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    /// A student or teacher appears twice in one pass.
    #[error("participant node '{0}' registered twice")]
    DuplicateParticipant(String),
    #[error("course size must be positive")]
    ZeroCourseSize,
}
