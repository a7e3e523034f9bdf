//! Weekly time slot model.
//!
//! Availability is expressed as a set of one-hour slots within a daily
//! window of 08:00 to 20:00, written `DAYHHMM` (e.g. `MON1500`).
//!
//! # Tolerance
//! A tolerance of `n` widens a slot to the same-day slots `n` hours before
//! and after it. The range is clamped to the daily window, so `FRI2000`
//! with tolerance 1 covers `FRI1900` and `FRI2000` only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ModelError;

/// First schedulable hour of the day.
pub const FIRST_HOUR: u8 = 8;
/// Last schedulable hour of the day.
pub const LAST_HOUR: u8 = 20;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Three-letter upper-case code.
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        }
    }
}

impl FromStr for Weekday {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.code() == s)
            .ok_or_else(|| ModelError::UnknownWeekday(s.to_string()))
    }
}

/// A one-hour weekly slot.
///
/// Ordered by day, then hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    /// Day of the week.
    pub day: Weekday,
    /// Starting hour, within `FIRST_HOUR..=LAST_HOUR`.
    pub hour: u8,
}

impl TimeSlot {
    /// Creates a slot, validating the hour against the daily window.
    pub fn new(day: Weekday, hour: u8) -> Result<Self, ModelError> {
        if !(FIRST_HOUR..=LAST_HOUR).contains(&hour) {
            return Err(ModelError::InvalidTimeSlot(format!(
                "{}{:02}00",
                day.code(),
                hour
            )));
        }
        Ok(Self { day, hour })
    }

    /// Parses a list of `DAYHHMM` strings.
    pub fn parse_list<S: AsRef<str>>(items: &[S]) -> Result<Vec<TimeSlot>, ModelError> {
        items.iter().map(|s| s.as_ref().parse()).collect()
    }

    /// Slots within `tolerance` hours of this one on the same day, earliest first.
    ///
    /// Always contains `self`. The range is clamped at the window edges.
    pub fn with_tolerance(&self, tolerance: u32) -> Vec<TimeSlot> {
        let tolerance = tolerance.min(u32::from(LAST_HOUR - FIRST_HOUR)) as u8;
        let low = self.hour.saturating_sub(tolerance).max(FIRST_HOUR);
        let high = self.hour.saturating_add(tolerance).min(LAST_HOUR);
        (low..=high)
            .map(|hour| TimeSlot {
                day: self.day,
                hour,
            })
            .collect()
    }

    /// Whether `other` lies within `tolerance` hours of this slot on the same day.
    pub fn within_tolerance(&self, other: &TimeSlot, tolerance: u32) -> bool {
        self.day == other.day && u32::from(self.hour.abs_diff(other.hour)) <= tolerance
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}00", self.day.code(), self.hour)
    }
}

impl FromStr for TimeSlot {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidTimeSlot(s.to_string());
        if s.len() != 7 || !s.is_ascii() {
            return Err(invalid());
        }
        let (day, time) = s.split_at(3);
        let day: Weekday = day.parse().map_err(|_| invalid())?;
        if !time.bytes().all(|b| b.is_ascii_digit()) || &time[2..] != "00" {
            return Err(invalid());
        }
        let hour: u8 = time[..2].parse().map_err(|_| invalid())?;
        TimeSlot::new(day, hour).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}
