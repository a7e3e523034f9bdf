//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::models::{Level, StudentType, DEFAULT_COURSE_SIZE};

use super::SchedulingOrder;

/// Refills of the default order queue allowed per run.
pub const DEFAULT_MAX_REFILLS: u32 = 10;

/// Settings for [`CourseScheduler`](super::CourseScheduler).
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seats per course when an order does not say.
    pub default_course_size: u32,
    /// How many times the default order queue may be appended.
    pub max_refills: u32,
    /// Student types in the order default passes visit them.
    pub type_priorities: Vec<StudentType>,
    /// Levels in the order default passes visit them.
    pub level_priorities: Vec<Level>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_course_size: DEFAULT_COURSE_SIZE,
            max_refills: DEFAULT_MAX_REFILLS,
            type_priorities: StudentType::DEFAULT_PRIORITIES.to_vec(),
            level_priorities: Level::DEFAULT_PRIORITIES.to_vec(),
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course_size(mut self, size: u32) -> Self {
        self.default_course_size = size;
        self
    }

    pub fn with_max_refills(mut self, refills: u32) -> Self {
        self.max_refills = refills;
        self
    }

    pub fn with_type_priorities(mut self, priorities: Vec<StudentType>) -> Self {
        self.type_priorities = priorities;
        self
    }

    pub fn with_level_priorities(mut self, priorities: Vec<Level>) -> Self {
        self.level_priorities = priorities;
        self
    }

    /// One order per (type, level), types outermost.
    pub fn default_orders(&self) -> Vec<SchedulingOrder> {
        self.type_priorities
            .iter()
            .flat_map(|&student_type| {
                self.level_priorities
                    .iter()
                    .map(move |&level| {
                        SchedulingOrder::new()
                            .with_type(student_type)
                            .with_level(level)
                    })
            })
            .collect()
    }
}
