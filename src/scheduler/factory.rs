//! Assignment orders to courses.
//!
//! # Algorithm
//!
//! 1. Interpret every slot order against the registry (overflow is skipped).
//! 2. Manufacture orders that fill their course exactly, in order.
//! 3. Take each remaining order in turn; if a later open order at the same
//!    level and schedule has exactly as many seats taken as this one has
//!    left, fold it in. Manufacture the result either way.
//! 4. Students in a course that cannot be opened, or refused by its roster,
//!    are scrapped: their processed flag is cleared for a later pass. A
//!    course whose roster refused everyone is released again.

use thiserror::Error;

use super::Registry;
use crate::matching::{AssignmentOrders, SlotKey};
use crate::models::{Course, CourseDetails, Level, TimeSlot};

/// Errors raised while interpreting assignment orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("order for {slot} names unknown student '{student_id}'")]
    UnknownStudent { slot: String, student_id: String },
    #[error("order names unknown teacher '{0}'")]
    UnknownTeacher(String),
    /// An order carries more seats than one course holds.
    #[error("order for {slot} takes {flow} seats, courses hold {course_size}")]
    OverCapacity {
        slot: String,
        flow: i64,
        course_size: u32,
    },
}

/// A slot order checked against the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedOrder {
    pub slot: SlotKey,
    pub student_ids: Vec<String>,
    current_size: i64,
    course_size: u32,
}

impl InterpretedOrder {
    pub fn level(&self) -> Level {
        self.slot.level
    }

    pub fn schedule(&self) -> TimeSlot {
        self.slot.schedule
    }

    /// Seats taken.
    pub fn current_size(&self) -> i64 {
        self.current_size
    }

    /// Seats left in a course of the configured size.
    pub fn remaining_places(&self) -> i64 {
        i64::from(self.course_size) - self.current_size
    }

    pub fn is_exact_fit(&self) -> bool {
        self.remaining_places() == 0
    }

    /// Whether `other` fills exactly the seats this order leaves.
    pub fn complements(&self, other: &InterpretedOrder) -> bool {
        self.level() == other.level()
            && self.schedule() == other.schedule()
            && other.current_size == self.remaining_places()
    }

    fn absorb(&mut self, other: InterpretedOrder) {
        self.student_ids.extend(other.student_ids);
        self.current_size += other.current_size;
    }
}

/// Courses and scrapped students from one `manufacture` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryReport {
    /// IDs of the courses opened, in order.
    pub manufactured: Vec<String>,
    /// Students sent back for another pass.
    pub scrapped: Vec<String>,
}

/// Turns assignment orders into courses.
///
/// Opened courses book their teacher and assign their students in the
/// registry, and are appended to the shared course list.
#[derive(Debug)]
pub struct CourseFactory<'a> {
    registry: &'a mut Registry,
    course_size: u32,
    courses: &'a mut Vec<Course>,
}

impl<'a> CourseFactory<'a> {
    pub fn new(registry: &'a mut Registry, course_size: u32, courses: &'a mut Vec<Course>) -> Self {
        Self {
            registry,
            course_size,
            courses,
        }
    }

    /// Checks every slot order against the registry.
    pub fn interpret(
        &self,
        orders: &AssignmentOrders,
    ) -> Result<Vec<InterpretedOrder>, FactoryError> {
        let mut interpreted = Vec::new();
        for (slot, order) in orders.slot_orders() {
            if self.registry.teacher(&slot.teacher_id).is_none() {
                return Err(FactoryError::UnknownTeacher(slot.teacher_id.clone()));
            }
            if let Some(missing) = order
                .student_ids
                .iter()
                .find(|id| self.registry.student(id).is_none())
            {
                return Err(FactoryError::UnknownStudent {
                    slot: slot.to_string(),
                    student_id: missing.clone(),
                });
            }
            if order.flow > i64::from(self.course_size) {
                return Err(FactoryError::OverCapacity {
                    slot: slot.to_string(),
                    flow: order.flow,
                    course_size: self.course_size,
                });
            }
            interpreted.push(InterpretedOrder {
                slot: slot.clone(),
                student_ids: order.student_ids.clone(),
                current_size: order.flow,
                course_size: self.course_size,
            });
        }
        Ok(interpreted)
    }

    /// Opens a course for every order, merging complementary partial orders.
    pub fn manufacture(
        &mut self,
        orders: &AssignmentOrders,
    ) -> Result<FactoryReport, FactoryError> {
        let (exact, mut open): (Vec<_>, Vec<_>) = self
            .interpret(orders)?
            .into_iter()
            .partition(InterpretedOrder::is_exact_fit);
        let mut report = FactoryReport::default();

        for order in exact {
            self.build(order, &mut report);
        }

        while !open.is_empty() {
            let mut order = open.remove(0);
            if let Some(pos) = open.iter().position(|other| order.complements(other)) {
                let other = open.remove(pos);
                tracing::debug!(into = %order.slot, from = %other.slot, "merging partial orders");
                order.absorb(other);
            }
            self.build(order, &mut report);
        }

        for student_id in &report.scrapped {
            self.registry.set_processed(student_id, false);
        }
        if !report.scrapped.is_empty() {
            tracing::debug!(scrapped = report.scrapped.len(), "students returned for retry");
        }
        Ok(report)
    }

    fn build(&mut self, order: InterpretedOrder, report: &mut FactoryReport) {
        let details = CourseDetails::new(order.slot.to_string(), order.level(), order.schedule())
            .with_size(self.course_size);
        let Some(teacher) = self.registry.teacher_mut(&order.slot.teacher_id) else {
            report.scrapped.extend(order.student_ids);
            return;
        };

        let mut course = match Course::open(details, teacher) {
            Ok(course) => course,
            Err(e) => {
                tracing::debug!(slot = %order.slot, error = %e, "course construction failed");
                report.scrapped.extend(order.student_ids);
                return;
            }
        };

        for student_id in order.student_ids {
            let Some(student) = self.registry.student_mut(&student_id) else {
                report.scrapped.push(student_id);
                continue;
            };
            if let Err(e) = course.enroll(student) {
                tracing::debug!(
                    course = %course.id,
                    student = %student_id,
                    error = %e,
                    "student refused"
                );
                report.scrapped.push(student_id);
            }
        }

        if course.roster().is_empty() {
            if let Some(teacher) = self.registry.teacher_mut(&course.teacher_id) {
                teacher.cancel_course(&course.id);
            }
            tracing::debug!(course = %course.id, "course discarded, roster refused every student");
            return;
        }

        tracing::debug!(
            course = %course.id,
            teacher = %course.teacher_id,
            students = course.size(),
            "course manufactured"
        );
        report.manufactured.push(course.id.clone());
        self.courses.push(course);
    }
}
