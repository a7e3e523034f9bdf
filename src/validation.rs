//! Input validation for course matching.
//!
//! Checks students and teachers before scheduling. Detects:
//! - Duplicate IDs
//! - Students or teachers with no available slots
//! - Teachers qualified for no level
//! - Teachers with no course budget

use crate::models::{Student, Teacher};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students, or two teachers, share the same ID.
    DuplicateId,
    /// A student or teacher lists no slots.
    EmptyAvailability,
    /// A teacher is qualified for no level.
    EmptyLevels,
    /// A teacher may take zero courses.
    NoCourseBudget,
}

impl ValidationErrorKind {
    /// Whether the problem makes input unusable as a whole.
    ///
    /// Empty availability or levels only leave that participant unmatched.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateId | Self::NoCourseBudget)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates students and teachers.
///
/// Checks:
/// 1. No duplicate student IDs
/// 2. No duplicate teacher IDs
/// 3. Every student and teacher lists at least one slot
/// 4. Every teacher teaches at least one level
/// 5. Every teacher may take at least one course
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input<'a>(
    students: impl IntoIterator<Item = &'a Student>,
    teachers: &[Teacher],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut student_ids = HashSet::new();
    for s in students {
        if !student_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate student ID: {}", s.id),
            ));
        }
        if s.availability.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyAvailability,
                format!("Student '{}' lists no available slots", s.id),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for t in teachers {
        if !teacher_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", t.id),
            ));
        }
        if t.availability.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyAvailability,
                format!("Teacher '{}' lists no available slots", t.id),
            ));
        }
        if t.levels.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyLevels,
                format!("Teacher '{}' teaches no level", t.id),
            ));
        }
        if t.max_courses == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoCourseBudget,
                format!("Teacher '{}' may take no courses", t.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, TimeSlot};

    fn slots(items: &[&str]) -> Vec<TimeSlot> {
        TimeSlot::parse_list(items).unwrap()
    }

    fn sample_teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("TC1.INT", 3)
                .with_availability(slots(&["MON1500", "MON1600"]))
                .with_levels(vec![Level::Intermediate, Level::Advanced]),
            Teacher::new("TC3.BEG", 1)
                .with_availability(slots(&["TUE1000"]))
                .with_level(Level::Beginner),
        ]
    }

    fn sample_students() -> Vec<Student> {
        vec![
            Student::group("ST4", Level::Intermediate).with_availability(slots(&["MON1500"])),
            Student::individual("ST2", Level::Beginner).with_availability(slots(&["TUE1000"])),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_students(), &sample_teachers()).is_ok());
    }

    #[test]
    fn test_duplicate_student_id() {
        let mut students = sample_students();
        students.push(
            Student::group("ST4", Level::Advanced).with_availability(slots(&["MON1600"])),
        );

        let errors = validate_input(&students, &sample_teachers()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("student")));
    }

    #[test]
    fn test_duplicate_teacher_id() {
        let mut teachers = sample_teachers();
        teachers.push(teachers[0].clone());

        let errors = validate_input(&sample_students(), &teachers).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("teacher")));
    }

    #[test]
    fn test_student_and_teacher_ids_may_coincide() {
        let students =
            vec![Student::group("X", Level::Beginner).with_availability(slots(&["TUE1000"]))];
        let teachers = vec![Teacher::new("X", 1)
            .with_availability(slots(&["TUE1000"]))
            .with_level(Level::Beginner)];
        assert!(validate_input(&students, &teachers).is_ok());
    }

    #[test]
    fn test_empty_availability() {
        let students = vec![Student::group("lonely", Level::Beginner)];
        let errors = validate_input(&students, &sample_teachers()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyAvailability);
        assert_eq!(errors[0].to_string(), "Student 'lonely' lists no available slots");
    }

    #[test]
    fn test_teacher_without_levels_or_budget() {
        let teachers = vec![Teacher::new("idle", 0).with_availability(slots(&["MON0800"]))];
        let errors = validate_input(&sample_students(), &teachers).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyLevels));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NoCourseBudget));
    }

    #[test]
    fn test_fatal_kinds() {
        assert!(ValidationErrorKind::DuplicateId.is_fatal());
        assert!(ValidationErrorKind::NoCourseBudget.is_fatal());
        assert!(!ValidationErrorKind::EmptyAvailability.is_fatal());
        assert!(!ValidationErrorKind::EmptyLevels.is_fatal());
    }

    #[test]
    fn test_multiple_errors() {
        let students = vec![Student::group("a", Level::Beginner)];
        let teachers = vec![Teacher::new("t", 0)];
        let errors = validate_input(&students, &teachers).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
