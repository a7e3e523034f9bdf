//! Student model.
//!
//! A student requests a course at one level, either as part of a group or
//! individually, and lists the weekly slots they can attend.

use serde::{Deserialize, Serialize};

use super::{Level, StudentType, TimeSlot};

/// Default priority for students and teachers.
pub const DEFAULT_PRIORITY: i32 = 5;

/// A student to be placed in a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Group or individual tuition.
    pub student_type: StudentType,
    /// Requested course level.
    pub level: Level,
    /// Slots the student can attend, in preference order.
    pub availability: Vec<TimeSlot>,
    /// Matching priority (lower = matched first).
    pub priority: i32,
    /// Course the student has been enrolled in, if any.
    #[serde(skip)]
    course_id: Option<String>,
}

impl Student {
    /// Creates a student with no availability and the default priority.
    pub fn new(id: impl Into<String>, student_type: StudentType, level: Level) -> Self {
        Self {
            id: id.into(),
            student_type,
            level,
            availability: Vec::new(),
            priority: DEFAULT_PRIORITY,
            course_id: None,
        }
    }

    /// Creates a group student.
    pub fn group(id: impl Into<String>, level: Level) -> Self {
        Self::new(id, StudentType::Group, level)
    }

    /// Creates an individual student.
    pub fn individual(id: impl Into<String>, level: Level) -> Self {
        Self::new(id, StudentType::Individual, level)
    }

    /// Sets the availability.
    pub fn with_availability(mut self, availability: Vec<TimeSlot>) -> Self {
        self.availability = availability;
        self
    }

    /// Adds one available slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.availability.push(slot);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_type(&self, student_type: StudentType) -> bool {
        self.student_type == student_type
    }

    pub fn is_level(&self, level: Level) -> bool {
        self.level == level
    }

    /// Whether the student lists any slot a course could take place in.
    pub fn is_schedulable(&self) -> bool {
        !self.availability.is_empty()
    }

    /// Whether the student listed this exact slot.
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        self.availability.contains(slot)
    }

    /// Availability widened by `tolerance` hours on each side, without duplicates.
    ///
    /// Keeps first-seen order so graph construction stays reproducible.
    pub fn availability_with_tolerance(&self, tolerance: u32) -> Vec<TimeSlot> {
        let mut expanded: Vec<TimeSlot> = Vec::new();
        for slot in &self.availability {
            for candidate in slot.with_tolerance(tolerance) {
                if !expanded.contains(&candidate) {
                    expanded.push(candidate);
                }
            }
        }
        expanded
    }

    /// Whether `slot` is within `tolerance` hours of any listed slot.
    pub fn matches_with_tolerance(&self, slot: &TimeSlot, tolerance: u32) -> bool {
        self.availability
            .iter()
            .any(|own| own.within_tolerance(slot, tolerance))
    }

    /// Capacity this student takes up in a course of `course_size` seats.
    ///
    /// Individual students occupy the whole course.
    pub fn demand(&self, course_size: u32) -> u32 {
        match self.student_type {
            StudentType::Group => 1,
            StudentType::Individual => course_size,
        }
    }

    /// Records enrollment in a course.
    pub fn assign_course(&mut self, course_id: impl Into<String>) {
        self.course_id = Some(course_id.into());
    }

    /// Course the student is enrolled in.
    pub fn course_id(&self) -> Option<&str> {
        self.course_id.as_deref()
    }

    pub fn is_assigned(&self) -> bool {
        self.course_id.is_some()
    }
}
