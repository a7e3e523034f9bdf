//! Parse errors for the textual forms of model values.

use thiserror::Error;

/// Errors raised while parsing levels, student types and time slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The level name is not one of the known levels.
    #[error("unknown level: {0}")]
    UnknownLevel(String),
    /// The student type is neither `GROUP` nor `INDIVIDUAL`.
    #[error("unknown student type: {0}")]
    UnknownStudentType(String),
    /// The weekday prefix is not a three-letter weekday code.
    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),
    /// The slot text is not of the form `DAYHHMM` on a whole hour inside the daily window.
    #[error("invalid time slot '{0}': expected DAYHHMM on the hour between 0800 and 2000")]
    InvalidTimeSlot(String),
}
