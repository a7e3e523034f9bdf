//! Course and roster model.
//!
//! A course binds one teacher, one level and one slot to a roster of
//! students. Opening a course books the teacher; enrolling a student marks
//! the student as assigned. Students the roster refuses are recorded as
//! rejected so the caller can retry them elsewhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Level, Student, StudentType, Teacher, TimeSlot};

/// Seats in a course when no size is given.
pub const DEFAULT_COURSE_SIZE: u32 = 6;

/// Why a course could not be opened with the given teacher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The teacher is not qualified for the course level.
    #[error("teacher '{teacher_id}' does not teach {level}")]
    LevelMismatch { teacher_id: String, level: Level },
    /// The teacher did not list the slot, or already teaches in it.
    #[error("teacher '{teacher_id}' is not available at {schedule}")]
    Unavailable {
        teacher_id: String,
        schedule: TimeSlot,
    },
    /// The teacher has no course budget left.
    #[error("teacher '{teacher_id}' is fully booked")]
    FullyBooked { teacher_id: String },
    /// A course needs at least one seat.
    #[error("course '{course_id}' has zero seats")]
    ZeroSize { course_id: String },
}

/// Why a roster refused a student.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("course is full ({max_size} seats)")]
    Full { max_size: u32 },
    #[error("course is for {expected} students, got {actual}")]
    TypeMismatch {
        expected: StudentType,
        actual: StudentType,
    },
    #[error("course level is {expected}, student level is {actual}")]
    LevelMismatch { expected: Level, actual: Level },
    #[error("student '{0}' is already enrolled in a course")]
    AlreadyAssigned(String),
    #[error("student '{0}' is already on this roster")]
    Duplicate(String),
}

/// Overall course status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    NotConfirmed,
    Confirmed,
}

/// Status of one roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    /// The student listed the course slot exactly.
    WaitingMatch,
    /// The student was placed through availability tolerance.
    WaitingUnmatch,
    Confirmed,
}

/// Parameters for opening a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    /// Course identifier.
    pub id: String,
    /// Course level.
    pub level: Level,
    /// Course slot.
    pub schedule: TimeSlot,
    /// Seats; `None` = `DEFAULT_COURSE_SIZE`.
    pub size: Option<u32>,
}

impl CourseDetails {
    pub fn new(id: impl Into<String>, level: Level, schedule: TimeSlot) -> Self {
        Self {
            id: id.into(),
            level,
            schedule,
            size: None,
        }
    }

    /// Sets the number of seats.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// A roster member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterMember {
    pub student_id: String,
    pub status: MemberStatus,
}

/// Students enrolled in a course.
///
/// The first accepted student fixes the roster type. An individual-first
/// roster is capped at one seat regardless of the configured size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRoster {
    max_size: u32,
    group_type: Option<StudentType>,
    members: Vec<RosterMember>,
}

impl CourseRoster {
    /// Creates an empty roster with `size` seats.
    pub fn new(size: u32) -> Self {
        Self {
            max_size: size,
            group_type: None,
            members: Vec::new(),
        }
    }

    /// Current seat limit.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Student type fixed by the first member.
    pub fn group_type(&self) -> Option<StudentType> {
        self.group_type
    }

    pub fn members(&self) -> &[RosterMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_size as usize
    }

    pub fn contains(&self, student_id: &str) -> bool {
        self.members.iter().any(|m| m.student_id == student_id)
    }

    /// Checks whether `student` may join a course at `level`.
    fn admit(&self, student: &Student, level: Level) -> Result<(), RosterError> {
        if self.is_full() {
            return Err(RosterError::Full {
                max_size: self.max_size,
            });
        }
        if let Some(expected) = self.group_type {
            if student.student_type != expected {
                return Err(RosterError::TypeMismatch {
                    expected,
                    actual: student.student_type,
                });
            }
        }
        if student.level != level {
            return Err(RosterError::LevelMismatch {
                expected: level,
                actual: student.level,
            });
        }
        if student.is_assigned() {
            return Err(RosterError::AlreadyAssigned(student.id.clone()));
        }
        if self.contains(&student.id) {
            return Err(RosterError::Duplicate(student.id.clone()));
        }
        Ok(())
    }

    fn push(&mut self, student: &Student, status: MemberStatus) {
        if self.members.is_empty() {
            self.group_type = Some(student.student_type);
            if student.student_type == StudentType::Individual {
                self.max_size = 1;
            }
        }
        self.members.push(RosterMember {
            student_id: student.id.clone(),
            status,
        });
    }
}

/// A scheduled course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier.
    pub id: String,
    /// Teacher running the course.
    pub teacher_id: String,
    /// Course level.
    pub level: Level,
    /// Course slot.
    pub schedule: TimeSlot,
    /// Overall status.
    pub status: CourseStatus,
    teacher_status: MemberStatus,
    roster: CourseRoster,
    rejected: Vec<String>,
}

impl Course {
    /// Opens a course and books it on `teacher`.
    ///
    /// Fails without booking anything if the teacher is not qualified for
    /// the level, is not free at the slot, or has no budget left.
    pub fn open(details: CourseDetails, teacher: &mut Teacher) -> Result<Self, ConstructionError> {
        let size = details.size.unwrap_or(DEFAULT_COURSE_SIZE);
        if size == 0 {
            return Err(ConstructionError::ZeroSize {
                course_id: details.id,
            });
        }
        if !teacher.teaches(details.level) {
            return Err(ConstructionError::LevelMismatch {
                teacher_id: teacher.id.clone(),
                level: details.level,
            });
        }
        if !teacher.is_available(&details.schedule) {
            return Err(ConstructionError::Unavailable {
                teacher_id: teacher.id.clone(),
                schedule: details.schedule,
            });
        }
        if teacher.is_fully_booked() {
            return Err(ConstructionError::FullyBooked {
                teacher_id: teacher.id.clone(),
            });
        }

        teacher.assign_course(details.id.clone(), details.schedule);
        Ok(Self {
            id: details.id,
            teacher_id: teacher.id.clone(),
            level: details.level,
            schedule: details.schedule,
            status: CourseStatus::NotConfirmed,
            teacher_status: MemberStatus::WaitingMatch,
            roster: CourseRoster::new(size),
            rejected: Vec::new(),
        })
    }

    /// Opens a course and enrolls `students` in order.
    pub fn build<'s>(
        details: CourseDetails,
        teacher: &mut Teacher,
        students: impl IntoIterator<Item = &'s mut Student>,
    ) -> Result<Self, ConstructionError> {
        let mut course = Self::open(details, teacher)?;
        for student in students {
            // refusals are recorded in `rejected_students`
            let _ = course.enroll(student);
        }
        Ok(course)
    }

    /// Enrolls a student, marking them assigned to this course.
    ///
    /// A refused student is added to `rejected_students`.
    pub fn enroll(&mut self, student: &mut Student) -> Result<(), RosterError> {
        if let Err(e) = self.roster.admit(student, self.level) {
            self.rejected.push(student.id.clone());
            return Err(e);
        }
        let status = if student.is_available(&self.schedule) {
            MemberStatus::WaitingMatch
        } else {
            MemberStatus::WaitingUnmatch
        };
        self.roster.push(student, status);
        student.assign_course(self.id.clone());
        Ok(())
    }

    /// Students refused by the roster.
    pub fn rejected_students(&self) -> &[String] {
        &self.rejected
    }

    pub fn roster(&self) -> &CourseRoster {
        &self.roster
    }

    /// Enrolled student IDs, in enrollment order.
    pub fn student_ids(&self) -> impl Iterator<Item = &str> {
        self.roster.members.iter().map(|m| m.student_id.as_str())
    }

    pub fn size(&self) -> usize {
        self.roster.len()
    }

    pub fn size_at_least(&self, n: usize) -> bool {
        self.roster.len() >= n
    }

    /// Marks the teacher as having confirmed.
    pub fn confirm_teacher(&mut self) {
        self.teacher_status = MemberStatus::Confirmed;
        self.refresh_status();
    }

    /// Marks an enrolled student as having confirmed. Returns `false` if not enrolled.
    pub fn confirm_student(&mut self, student_id: &str) -> bool {
        let found = match self
            .roster
            .members
            .iter_mut()
            .find(|m| m.student_id == student_id)
        {
            Some(member) => {
                member.status = MemberStatus::Confirmed;
                true
            }
            None => false,
        };
        self.refresh_status();
        found
    }

    /// Whether the teacher and every enrolled student confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.teacher_status == MemberStatus::Confirmed
            && self
                .roster
                .members
                .iter()
                .all(|m| m.status == MemberStatus::Confirmed)
    }

    fn refresh_status(&mut self) {
        self.status = if self.is_confirmed() {
            CourseStatus::Confirmed
        } else {
            CourseStatus::NotConfirmed
        };
    }
}
