//! Course levels and student enrollment types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ModelError;

/// Proficiency level of a course, a student, or a teacher qualification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Beginner,
    PreIntermediate,
    Intermediate,
    UpperIntermediate,
    Advanced,
}

/// How a student wants to be taught.
///
/// Group students share a course with others; individual students take a
/// course alone but occupy a whole slot of capacity in the flow network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentType {
    Group,
    Individual,
}

impl Level {
    /// All levels, lowest first.
    pub const ALL: [Level; 5] = [
        Level::Beginner,
        Level::PreIntermediate,
        Level::Intermediate,
        Level::UpperIntermediate,
        Level::Advanced,
    ];

    /// Default order in which levels are scheduled.
    pub const DEFAULT_PRIORITIES: [Level; 5] = [
        Level::Intermediate,
        Level::UpperIntermediate,
        Level::PreIntermediate,
        Level::Advanced,
        Level::Beginner,
    ];

    /// Canonical upper-case name (e.g. `UPPER_INTERMEDIATE`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "BEGINNER",
            Level::PreIntermediate => "PRE_INTERMEDIATE",
            Level::Intermediate => "INTERMEDIATE",
            Level::UpperIntermediate => "UPPER_INTERMEDIATE",
            Level::Advanced => "ADVANCED",
        }
    }
}

impl StudentType {
    /// Default order in which student types are scheduled.
    pub const DEFAULT_PRIORITIES: [StudentType; 2] = [StudentType::Group, StudentType::Individual];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentType::Group => "GROUP",
            StudentType::Individual => "INDIVIDUAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StudentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ModelError;

    /// Accepts both `UPPER_INTERMEDIATE` and `UPPER-INTERMEDIATE`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownLevel(s.to_string()))
    }
}

impl FromStr for StudentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GROUP" => Ok(StudentType::Group),
            "INDIVIDUAL" => Ok(StudentType::Individual),
            _ => Err(ModelError::UnknownStudentType(s.to_string())),
        }
    }
}
