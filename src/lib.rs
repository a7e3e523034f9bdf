//! Course matching for the U-Engine ecosystem.
//!
//! Places students into teacher-led courses under level, availability,
//! capacity and priority constraints. Each scheduling pass is solved as a
//! minimum-cost maximum-flow problem; the flow is then turned into concrete
//! courses.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `Teacher`, `TimeSlot`, `Level`,
//!   `Course`, `CourseRoster`
//! - **`flow`**: Flow networks and the successive-shortest-path solver
//! - **`matching`**: Participant graph building, one matching pass, flow translation
//! - **`scheduler`**: `CourseScheduler`, course manufacture, run summary
//! - **`validation`**: Input integrity checks (duplicate IDs, empty availability, budgets)
//!
//! # Architecture
//!
//! ```text
//! CourseScheduler -> Assigner -> GraphBuilder -> MinCostFlowSolver
//!        |              \-> FlowTranslator -> AssignmentOrders
//!        \-> CourseFactory -> Course
//! ```
//!
//! # References
//!
//! - Ahuja, Magnanti & Orlin (1993), "Network Flows: Theory, Algorithms, and Applications"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod flow;
pub mod matching;
pub mod models;
pub mod scheduler;
pub mod validation;
