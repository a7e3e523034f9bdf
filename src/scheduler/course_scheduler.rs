//! Priority-ordered scheduling passes.
//!
//! # Algorithm
//!
//! 1. Run the caller's orders in sequence.
//! 2. When the queue is empty and some students were never taken by a
//!    pass, append one order per (student type, level) from the config.
//!    This counts as one refill; at most `max_refills` are allowed.
//! 3. Each pass takes the unprocessed, unassigned students its order
//!    matches, marks them processed, matches them against all teachers and
//!    manufactures courses. Scrapped students become unprocessed again.
//!
//! Students routed to overflow stay processed: no later pass retries them.
//! Students without availability and teachers without slots or levels are
//! reported with a warning and left out of every pass.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::collections::VecDeque;

use thiserror::Error;

use super::{
    CourseFactory, FactoryError, FactoryReport, Registry, ScheduleSummary, SchedulerConfig,
    SchedulingOrder,
};
use crate::matching::{Assigner, MatchingError};
use crate::models::{Course, Student, Teacher};
use crate::validation::{validate_input, ValidationError};

/// Errors raised by [`CourseScheduler::schedule_courses`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulingError {
    #[error("input failed validation: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),
    #[error("scheduling order #{index} is invalid: {reason}")]
    InvalidOrder { index: usize, reason: String },
    #[error("invalid scheduler configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Matching(#[from] MatchingError),
    #[error(transparent)]
    Factory(#[from] FactoryError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Places students into courses over repeated matching passes.
///
/// # Example
///
/// ```
/// use u_course::models::{Level, Student, Teacher, TimeSlot};
/// use u_course::scheduler::{CourseScheduler, SchedulerConfig};
///
/// let slots = TimeSlot::parse_list(&["MON1500", "MON1600"]).unwrap();
/// let mut scheduler = CourseScheduler::new(SchedulerConfig::default());
/// scheduler.add_teacher(
///     Teacher::new("TC1", 2)
///         .with_availability(slots.clone())
///         .with_level(Level::Intermediate),
/// );
/// for id in ["ST1", "ST2"] {
///     let student = Student::group(id, Level::Intermediate);
///     scheduler.add_student(student.with_availability(slots.clone()));
/// }
///
/// let courses = scheduler.schedule_courses(Vec::new()).unwrap();
/// assert_eq!(courses.len(), 1);
/// assert_eq!(courses[0].size(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CourseScheduler {
    config: SchedulerConfig,
    registry: Registry,
    courses: Vec<Course>,
}

impl CourseScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
            courses: Vec::new(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Adds a student. Returns `false` if the id is already registered.
    pub fn add_student(&mut self, student: Student) -> bool {
        self.registry.add_student(student)
    }

    /// Adds a teacher. Returns `false` if the id is already registered.
    pub fn add_teacher(&mut self, teacher: Teacher) -> bool {
        self.registry.add_teacher(teacher)
    }

    /// Adds students in order and returns how many were new.
    pub fn bulk_add_students(&mut self, students: impl IntoIterator<Item = Student>) -> usize {
        students
            .into_iter()
            .map(|s| self.registry.add_student(s))
            .filter(|&added| added)
            .count()
    }

    /// Adds teachers in order and returns how many were new.
    pub fn bulk_add_teachers(&mut self, teachers: impl IntoIterator<Item = Teacher>) -> usize {
        teachers
            .into_iter()
            .map(|t| self.registry.add_teacher(t))
            .filter(|&added| added)
            .count()
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.registry.student(id)
    }

    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.registry.teacher(id)
    }

    /// Students, in registration order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.registry.students()
    }

    pub fn teachers(&self) -> &[Teacher] {
        self.registry.teachers()
    }

    /// Courses produced so far.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Students without a course.
    pub fn unassigned_students(&self) -> Vec<&Student> {
        self.registry.students().filter(|s| !s.is_assigned()).collect()
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::calculate(&self.courses, self.registry.students())
    }

    /// Runs `orders`, then default passes while students remain, and returns
    /// every course produced so far.
    ///
    /// Does nothing if there are no students or no teachers.
    pub fn schedule_courses(
        &mut self,
        orders: Vec<SchedulingOrder>,
    ) -> Result<&[Course], SchedulingError> {
        if self.registry.student_count() == 0 || self.registry.teacher_count() == 0 {
            return Ok(&self.courses);
        }
        self.validate(&orders)?;

        let mut queue: VecDeque<SchedulingOrder> = orders.into();
        let mut refills = 0;
        let mut passes = 0;
        loop {
            let Some(order) = queue.pop_front() else {
                if !self.registry.has_unprocessed() {
                    break;
                }
                if refills >= self.config.max_refills {
                    tracing::warn!(
                        refills,
                        unassigned = self.unassigned_students().len(),
                        "refill budget exhausted, returning partial schedule"
                    );
                    break;
                }
                refills += 1;
                queue.extend(self.config.default_orders());
                continue;
            };
            passes += 1;
            self.run_pass(&order)?;
        }

        tracing::debug!(
            passes,
            refills,
            courses = self.courses.len(),
            "scheduling finished"
        );
        Ok(&self.courses)
    }

    fn validate(&self, orders: &[SchedulingOrder]) -> Result<(), SchedulingError> {
        if let Err(errors) = validate_input(self.registry.students(), self.registry.teachers()) {
            let (fatal, unmatchable): (Vec<_>, Vec<_>) =
                errors.into_iter().partition(|e| e.kind.is_fatal());
            for problem in &unmatchable {
                tracing::warn!(kind = ?problem.kind, "{problem}, left out of matching");
            }
            if !fatal.is_empty() {
                return Err(SchedulingError::InvalidInput(fatal));
            }
        }
        if self.config.default_course_size == 0 {
            return Err(SchedulingError::InvalidConfig(
                "default course size must be positive".into(),
            ));
        }
        if let Some(index) = orders.iter().position(|o| o.course_size == Some(0)) {
            return Err(SchedulingError::InvalidOrder {
                index,
                reason: "course size must be positive".into(),
            });
        }
        Ok(())
    }

    /// One pass: select, mark processed, match, manufacture.
    fn run_pass(&mut self, order: &SchedulingOrder) -> Result<FactoryReport, SchedulingError> {
        let course_size = order.course_size.unwrap_or(self.config.default_course_size);
        let selected: Vec<String> = self
            .registry
            .entries()
            .iter()
            .filter(|e| {
                !e.processed
                    && !e.student.is_assigned()
                    && e.student.is_schedulable()
                    && order.matches(&e.student)
            })
            .map(|e| e.student.id.clone())
            .collect();
        if selected.is_empty() {
            return Ok(FactoryReport::default());
        }
        for id in &selected {
            self.registry.set_processed(id, true);
        }

        let orders = {
            let cohort = selected.iter().filter_map(|id| self.registry.student(id));
            let teachers = self
                .registry
                .teachers()
                .iter()
                .filter(|t| t.is_schedulable());
            Assigner::new(cohort, teachers, course_size, order.tolerance).run()?
        };
        let Some(orders) = orders else {
            return Ok(FactoryReport::default());
        };

        let report = CourseFactory::new(&mut self.registry, course_size, &mut self.courses)
            .manufacture(&orders)?;
        tracing::debug!(
            student_type = ?order.student_type,
            level = ?order.level,
            tolerance = order.tolerance,
            selected = selected.len(),
            manufactured = report.manufactured.len(),
            scrapped = report.scrapped.len(),
            "scheduling pass complete"
        );
        Ok(report)
    }
}
