//! Scheduling run summary.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total courses | Courses opened |
//! | Assigned / unassigned | Students with / without a course |
//! | Assignment rate | Assigned fraction of all students |
//! | Avg course size | Mean roster length |
//! | Courses by level | Course count per level |
//! | Booked teachers | Distinct teachers running a course |

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::{Course, Level, Student};

/// Outcome indicators of a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_courses: usize,
    pub total_students: usize,
    pub assigned_students: usize,
    pub unassigned_students: usize,
    /// Fraction of students placed (0.0..1.0).
    pub assignment_rate: f64,
    /// Mean students per course.
    pub avg_course_size: f64,
    pub courses_by_level: BTreeMap<Level, usize>,
    pub booked_teachers: usize,
}

impl ScheduleSummary {
    /// Computes the summary from produced courses and all students.
    pub fn calculate<'a>(
        courses: &[Course],
        students: impl IntoIterator<Item = &'a Student>,
    ) -> Self {
        let mut total_students = 0;
        let mut assigned_students = 0;
        for student in students {
            total_students += 1;
            if student.is_assigned() {
                assigned_students += 1;
            }
        }

        let mut courses_by_level = BTreeMap::new();
        let mut teachers = HashSet::new();
        let mut enrolled = 0;
        for course in courses {
            *courses_by_level.entry(course.level).or_insert(0) += 1;
            teachers.insert(course.teacher_id.as_str());
            enrolled += course.size();
        }

        // No students -> nobody left out
        let assignment_rate = if total_students == 0 {
            1.0
        } else {
            assigned_students as f64 / total_students as f64
        };
        let avg_course_size = if courses.is_empty() {
            0.0
        } else {
            enrolled as f64 / courses.len() as f64
        };

        Self {
            total_courses: courses.len(),
            total_students,
            assigned_students,
            unassigned_students: total_students - assigned_students,
            assignment_rate,
            avg_course_size,
            courses_by_level,
            booked_teachers: teachers.len(),
        }
    }

    /// Whether at least `min_rate` of the students were placed.
    pub fn meets_threshold(&self, min_rate: f64) -> bool {
        self.assignment_rate >= min_rate
    }
}
