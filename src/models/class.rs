//! Class, student and academic level models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::WeeklySlot;
use crate::error::{EngineError, EngineResult};

/// Academic level of a class or student.
///
/// The level selects the grading coefficient table and the curriculum modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Common core year (TC).
    #[serde(alias = "TC")]
    CommonCore,
    /// First baccalaureate year.
    #[serde(alias = "1ère Bac")]
    FirstYear,
    /// Second baccalaureate year.
    #[serde(alias = "2ème Bac")]
    SecondYear,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 3] = [Level::CommonCore, Level::FirstYear, Level::SecondYear];
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::CommonCore => write!(f, "TC"),
            Level::FirstYear => write!(f, "1st year"),
            Level::SecondYear => write!(f, "2nd year"),
        }
    }
}

/// A roster group with its weekly timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Unique identifier for the class.
    pub id: String,
    /// Display name (e.g. "TC A").
    pub name: String,
    /// Academic level.
    pub level: Level,
    /// Weekly recurring slots.
    #[serde(default)]
    pub slots: Vec<WeeklySlot>,
}

impl Class {
    /// Checks the class-edit invariants: at least one slot, and no two slots
    /// on the same weekday.
    ///
    /// # Example
    ///
    /// ```
    /// use gradebook_engine::models::{Class, Level, WeeklySlot};
    /// use chrono::{NaiveTime, Weekday};
    ///
    /// let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    /// let class = Class {
    ///     id: "class-tc-a".to_string(),
    ///     name: "TC A".to_string(),
    ///     level: Level::CommonCore,
    ///     slots: vec![
    ///         WeeklySlot::new(Weekday::Mon, eight, 60),
    ///         WeeklySlot::new(Weekday::Mon, eight, 60),
    ///     ],
    /// };
    /// assert!(class.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.slots.is_empty() {
            return Err(EngineError::InvalidClass {
                class_id: self.id.clone(),
                message: "at least one weekly slot is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for slot in &self.slots {
            if !seen.insert(slot.weekday) {
                return Err(EngineError::InvalidClass {
                    class_id: self.id.clone(),
                    message: format!("two slots share weekday {}", slot.weekday),
                });
            }
            if slot.duration_minutes == 0 {
                return Err(EngineError::InvalidClass {
                    class_id: self.id.clone(),
                    message: format!("slot on {} has zero duration", slot.weekday),
                });
            }
        }

        Ok(())
    }

    /// Returns true when the class has at least one weekly slot.
    pub fn has_schedule(&self) -> bool {
        !self.slots.is_empty()
    }
}

/// A student belonging to a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier for the student.
    pub id: String,
    /// Owning class.
    pub class_id: String,
    /// Last name.
    pub last_name: String,
    /// First name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Roll number within the class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<u32>,
    /// Level of the student's class.
    pub level: Level,
    /// Inactive students are left out of attendance rosters.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Student {
    /// Display name used on attendance rosters ("Last First").
    pub fn display_name(&self) -> String {
        match &self.first_name {
            Some(first) if !first.trim().is_empty() => format!("{} {}", self.last_name, first.trim()),
            _ => self.last_name.clone(),
        }
    }
}
