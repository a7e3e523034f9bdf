//! Scheduling orders: which students a pass considers and how.

use serde::{Deserialize, Serialize};

use crate::models::{Level, Student, StudentType};

/// Criteria for one scheduling pass.
///
/// Absent filters match every student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingOrder {
    /// Only students of this type.
    pub student_type: Option<StudentType>,
    /// Only students at this level.
    pub level: Option<Level>,
    /// Hours a course may sit away from a student's listed slot.
    pub tolerance: u32,
    /// Seats per course; `None` = the scheduler's default.
    pub course_size: Option<u32>,
}

impl SchedulingOrder {
    /// An order matching every student, with no tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, student_type: StudentType) -> Self {
        self.student_type = Some(student_type);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_course_size(mut self, size: u32) -> Self {
        self.course_size = Some(size);
        self
    }

    /// Whether `student` passes the type and level filters.
    pub fn matches(&self, student: &Student) -> bool {
        self.student_type.map_or(true, |t| student.is_type(t))
            && self.level.map_or(true, |l| student.is_level(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_order_matches_everyone() {
        let order = SchedulingOrder::new();
        assert!(order.matches(&Student::group("a", Level::Beginner)));
        assert!(order.matches(&Student::individual("b", Level::Advanced)));
    }

    #[test]
    fn test_filters() {
        let order = SchedulingOrder::new()
            .with_type(StudentType::Group)
            .with_level(Level::Intermediate);
        assert!(order.matches(&Student::group("a", Level::Intermediate)));
        assert!(!order.matches(&Student::individual("b", Level::Intermediate)));
        assert!(!order.matches(&Student::group("c", Level::Advanced)));

        let by_level = SchedulingOrder::new().with_level(Level::Advanced);
        assert!(by_level.matches(&Student::individual("d", Level::Advanced)));
    }

    #[test]
    fn test_order_from_json() {
        let order: SchedulingOrder =
            serde_json::from_str(r#"{"level": "UPPER_INTERMEDIATE", "tolerance": 1}"#).unwrap();
        assert_eq!(order.level, Some(Level::UpperIntermediate));
        assert_eq!(order.student_type, None);
        assert_eq!(order.tolerance, 1);
        assert_eq!(order.course_size, None);

        let sized = SchedulingOrder::new().with_course_size(4).with_tolerance(2);
        let back: SchedulingOrder =
            serde_json::from_str(&serde_json::to_string(&sized).unwrap()).unwrap();
        assert_eq!(back, sized);
    }
}
