//! Calendar slots and weekly slot patterns.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::time_of_day::hhmm;

/// Start time assumed for a session stored without an explicit time.
pub const DEFAULT_SLOT_TIME: NaiveTime = match NaiveTime::from_hms_opt(9, 30, 0) {
    Some(time) => time,
    None => panic!("09:30 is a valid time of day"),
};

/// A concrete `(date, time)` pair a session can occupy.
///
/// Ordering is chronological: by date, then by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time of day.
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
}

impl Slot {
    /// Creates a slot.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }
}

/// A weekly recurring time slot of a class (e.g. every Monday 08:00, 60 minutes).
///
/// # Example
///
/// ```
/// use gradebook_engine::models::WeeklySlot;
/// use chrono::{NaiveTime, Weekday};
///
/// let slot: WeeklySlot = serde_json::from_str(
///     r#"{"weekday":"Mon","start":"08:00","duration_minutes":60,"room":"Gymnase"}"#,
/// ).unwrap();
/// assert_eq!(slot.weekday, Weekday::Mon);
/// assert_eq!(slot.start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySlot {
    /// Day of the week the class meets.
    pub weekday: Weekday,
    /// Start time (`HH:MM`).
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Length of the lesson in minutes.
    pub duration_minutes: u32,
    /// Optional room or field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl WeeklySlot {
    /// Creates a weekly slot without a room.
    pub fn new(weekday: Weekday, start: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            weekday,
            start,
            duration_minutes,
            room: None,
        }
    }
}
