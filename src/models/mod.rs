//! Course matching domain models.
//!
//! Provides the entities that take part in matching and the courses it
//! produces.
//!
//! | Type | Role |
//! |------|------|
//! | `Student` | Requests a course at one level, in some slots |
//! | `Teacher` | Offers courses at some levels, in some slots, up to a budget |
//! | `TimeSlot` | One-hour weekly slot, `DAYHHMM` |
//! | `Course` | Teacher + level + slot + roster |

mod course;
mod error;
mod level;
mod student;
mod teacher;
mod timeslot;

pub use course::{
    ConstructionError, Course, CourseDetails, CourseRoster, CourseStatus, MemberStatus,
    RosterError, RosterMember, DEFAULT_COURSE_SIZE,
};
pub use error::ModelError;
pub use level::{Level, StudentType};
pub use student::{Student, DEFAULT_PRIORITY};
pub use teacher::{Booking, Teacher};
pub use timeslot::{TimeSlot, Weekday, FIRST_HOUR, LAST_HOUR};
