//! Course scheduling over repeated matching passes.
//!
//! `CourseScheduler` owns the students, teachers and produced courses. Each
//! pass selects a cohort by a `SchedulingOrder`, matches it with
//! [`Assigner`](crate::matching::Assigner) and hands the resulting orders to
//! `CourseFactory`, which opens the courses.
//!
//! # Summary
//!
//! `ScheduleSummary` reports course counts, assignment rate and average
//! course size for a finished run.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod config;
mod course_scheduler;
mod factory;
mod order;
mod registry;
mod summary;

pub use config::{SchedulerConfig, DEFAULT_MAX_REFILLS};
pub use course_scheduler::{CourseScheduler, SchedulingError};
pub use factory::{CourseFactory, FactoryError, FactoryReport, InterpretedOrder};
pub use order::SchedulingOrder;
pub use registry::{Registry, StudentEntry};
pub use summary::ScheduleSummary;
