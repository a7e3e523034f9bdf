//! Teacher model.
//!
//! Teachers offer courses at the levels they are qualified for, in the
//! slots they are available, up to a maximum number of courses.

use serde::{Deserialize, Serialize};

use super::{Level, TimeSlot, DEFAULT_PRIORITY};

/// A teacher who can run courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Slots the teacher can teach, in preference order.
    pub availability: Vec<TimeSlot>,
    /// Levels the teacher is qualified to teach.
    pub levels: Vec<Level>,
    /// Maximum number of courses the teacher takes on.
    pub max_courses: u32,
    /// Matching priority (lower = preferred).
    pub priority: i32,
    /// Courses booked so far, with their slot.
    #[serde(skip)]
    bookings: Vec<Booking>,
}

/// A course booked on a teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Booked course ID.
    pub course_id: String,
    /// Slot the course occupies.
    pub schedule: TimeSlot,
}

impl Teacher {
    /// Creates a teacher taking at most `max_courses` courses.
    pub fn new(id: impl Into<String>, max_courses: u32) -> Self {
        Self {
            id: id.into(),
            availability: Vec::new(),
            levels: Vec::new(),
            max_courses,
            priority: DEFAULT_PRIORITY,
            bookings: Vec::new(),
        }
    }

    /// Sets the availability.
    pub fn with_availability(mut self, availability: Vec<TimeSlot>) -> Self {
        self.availability = availability;
        self
    }

    /// Sets the qualified levels.
    pub fn with_levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = levels;
        self
    }

    /// Adds a qualified level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.levels.push(level);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the teacher lists at least one slot and one level.
    ///
    /// Budget is not considered; see [`Teacher::is_fully_booked`].
    pub fn is_schedulable(&self) -> bool {
        !self.availability.is_empty() && !self.levels.is_empty()
    }

    /// Whether the teacher is qualified for `level`.
    pub fn teaches(&self, level: Level) -> bool {
        self.levels.contains(&level)
    }

    /// Whether the teacher listed `slot` and has not booked a course in it yet.
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        self.availability.contains(slot) && !self.bookings.iter().any(|b| b.schedule == *slot)
    }

    /// Listed slots that are still free, in declared order.
    pub fn free_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.availability
            .iter()
            .filter(move |slot| !self.bookings.iter().any(|b| b.schedule == **slot))
    }

    /// Number of further courses the teacher can take.
    pub fn remaining_courses(&self) -> u32 {
        self.max_courses
            .saturating_sub(self.bookings.len().try_into().unwrap_or(u32::MAX))
    }

    pub fn is_fully_booked(&self) -> bool {
        self.remaining_courses() == 0
    }

    /// Records a booked course.
    pub fn assign_course(&mut self, course_id: impl Into<String>, schedule: TimeSlot) {
        self.bookings.push(Booking {
            course_id: course_id.into(),
            schedule,
        });
    }

    /// Drops a booking, freeing its slot and budget. Returns `false` if not booked.
    pub fn cancel_course(&mut self, course_id: &str) -> bool {
        match self.bookings.iter().position(|b| b.course_id == course_id) {
            Some(i) => {
                self.bookings.remove(i);
                true
            }
            None => false,
        }
    }

    /// Courses booked so far.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(items: &[&str]) -> Vec<TimeSlot> {
        TimeSlot::parse_list(items).unwrap()
    }

    fn sample_teacher() -> Teacher {
        Teacher::new("TC1.INT", 3)
            .with_availability(slots(&["MON1500", "MON1600", "TUE1600", "WED1400"]))
            .with_levels(vec![
                Level::Intermediate,
                Level::Advanced,
                Level::UpperIntermediate,
            ])
    }

    #[test]
    fn test_teacher_builder() {
        let t = sample_teacher().with_priority(1).with_level(Level::Beginner);
        assert_eq!(t.id, "TC1.INT");
        assert_eq!(t.max_courses, 3);
        assert_eq!(t.priority, 1);
        assert!(t.teaches(Level::Intermediate));
        assert!(t.teaches(Level::Beginner));
        assert!(!t.teaches(Level::PreIntermediate));
    }

    #[test]
    fn test_bookings_consume_budget_and_slots() {
        let mut t = sample_teacher();
        let mon15: TimeSlot = "MON1500".parse().unwrap();
        assert!(t.is_available(&mon15));
        assert_eq!(t.remaining_courses(), 3);

        t.assign_course("C1", mon15);
        assert!(!t.is_available(&mon15));
        assert_eq!(t.remaining_courses(), 2);
        assert_eq!(t.free_slots().count(), 3);
        assert_eq!(t.bookings()[0].course_id, "C1");

        t.assign_course("C2", "MON1600".parse().unwrap());
        t.assign_course("C3", "TUE1600".parse().unwrap());
        assert!(t.is_fully_booked());
    }

    #[test]
    fn test_cancel_course_frees_slot() {
        let mut t = sample_teacher();
        let mon15: TimeSlot = "MON1500".parse().unwrap();
        t.assign_course("C1", mon15);
        assert!(!t.cancel_course("C9"));
        assert!(t.cancel_course("C1"));
        assert!(t.is_available(&mon15));
        assert_eq!(t.remaining_courses(), 3);
    }

    #[test]
    fn test_schedulable_needs_slots_and_levels() {
        let bare = Teacher::new("T", 1);
        assert!(!bare.is_schedulable());
        let no_levels = Teacher::new("T", 1).with_availability(vec!["MON1500".parse().unwrap()]);
        assert!(!no_levels.is_schedulable());
        assert!(no_levels.with_level(Level::Beginner).is_schedulable());
    }

    #[test]
    fn test_unlisted_slot_unavailable() {
        let t = sample_teacher();
        assert!(!t.is_available(&"FRI1000".parse().unwrap()));
    }

    #[test]
    fn test_zero_budget_is_fully_booked() {
        assert!(Teacher::new("idle", 0).is_fully_booked());
    }
}
