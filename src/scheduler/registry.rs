//! Students and teachers known to a scheduler, with per-student pass state.

use std::collections::HashMap;

use crate::models::{Student, Teacher};

/// A registered student and whether a pass has taken them.
#[derive(Debug, Clone)]
pub struct StudentEntry {
    pub student: Student,
    /// Set when a pass selects the student; cleared when they are scrapped.
    pub processed: bool,
}

/// Insertion-ordered student and teacher tables keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    students: Vec<StudentEntry>,
    student_index: HashMap<String, usize>,
    teachers: Vec<Teacher>,
    teacher_index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a student. Returns `false` if the id is taken.
    pub fn add_student(&mut self, student: Student) -> bool {
        if self.student_index.contains_key(&student.id) {
            return false;
        }
        self.student_index
            .insert(student.id.clone(), self.students.len());
        self.students.push(StudentEntry {
            student,
            processed: false,
        });
        true
    }

    /// Adds a teacher. Returns `false` if the id is taken.
    pub fn add_teacher(&mut self, teacher: Teacher) -> bool {
        if self.teacher_index.contains_key(&teacher.id) {
            return false;
        }
        self.teacher_index
            .insert(teacher.id.clone(), self.teachers.len());
        self.teachers.push(teacher);
        true
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.student_index.get(id).map(|&i| &self.students[i].student)
    }

    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.student_index
            .get(id)
            .map(|&i| &mut self.students[i].student)
    }

    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teacher_index.get(id).map(|&i| &self.teachers[i])
    }

    pub fn teacher_mut(&mut self, id: &str) -> Option<&mut Teacher> {
        self.teacher_index
            .get(id)
            .map(|&i| &mut self.teachers[i])
    }

    pub fn is_processed(&self, id: &str) -> Option<bool> {
        self.student_index.get(id).map(|&i| self.students[i].processed)
    }

    /// Sets the processed flag. Returns `false` for an unknown id.
    pub fn set_processed(&mut self, id: &str, processed: bool) -> bool {
        match self.student_index.get(id) {
            Some(&i) => {
                self.students[i].processed = processed;
                true
            }
            None => false,
        }
    }

    /// Students, in registration order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().map(|e| &e.student)
    }

    pub fn entries(&self) -> &[StudentEntry] {
        &self.students
    }

    /// Teachers, in registration order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Whether any schedulable, unassigned student still waits for a pass.
    pub fn has_unprocessed(&self) -> bool {
        self.students
            .iter()
            .any(|e| !e.processed && !e.student.is_assigned() && e.student.is_schedulable())
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }
}
