//! Session model: one dated occurrence of a teaching cycle.
//!
//! Besides its schedule, a session carries the attendance roster, the lesson
//! journal and the reschedule provenance chain used to undo absence moves.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time_of_day::hhmm;
use super::{DEFAULT_SLOT_TIME, Slot, Student};

/// Progress of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Scheduled, nothing recorded yet.
    #[default]
    Planned,
    /// Attendance has been taken.
    AttendanceTaken,
    /// Evaluation grades have been entered.
    Evaluated,
}

/// Attendance status of one student for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// On time.
    Present,
    /// Arrived late.
    Late,
    /// Absent without justification.
    Absent,
    /// Absent with a valid excuse.
    Excused,
}

impl AttendanceStatus {
    /// Present and late both count as attended.
    pub fn attended(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

/// Optional behaviour marker noted during attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behaviour {
    /// Noticeably good behaviour.
    Positive,
    /// Problematic behaviour.
    Negative,
}

/// One line of an attendance roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The student this line is for.
    pub student_id: String,
    /// Name shown on the roster.
    pub name: String,
    /// Attendance status.
    pub status: AttendanceStatus,
    /// Behaviour marker, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behaviour: Option<Behaviour>,
}

/// Builds an attendance roster for the active students of a class, every
/// student starting out absent.
pub fn roster_for_students(students: &[Student]) -> Vec<AttendanceEntry> {
    students
        .iter()
        .filter(|s| s.active)
        .map(|s| AttendanceEntry {
            student_id: s.id.clone(),
            name: s.display_name(),
            status: AttendanceStatus::Absent,
            behaviour: None,
        })
        .collect()
}

/// The lesson journal (cahier de texte) of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Learning objectives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<String>,
    /// Lesson content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Class organisation (groups, equipment, space).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation: Option<String>,
    /// Instructions given to students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Success criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<String>,
}

/// One step of a session's reschedule provenance chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMove {
    /// The absence that caused the move.
    pub absence_id: String,
    /// Date before the move.
    pub from_date: NaiveDate,
    /// Time before the move, if the session had one.
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub from_time: Option<NaiveTime>,
}

/// One scheduled occurrence of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier, unique within the cycle.
    pub id: String,
    /// Owning cycle.
    pub cycle_id: String,
    /// 1-based order number, reassigned on every sort.
    pub number: u32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time, when known.
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Theme or topic of the lesson.
    #[serde(default)]
    pub theme: String,
    /// Set once the session has taken place; locked sessions never move.
    #[serde(default)]
    pub locked: bool,
    /// True only for the chronologically last session of the cycle.
    #[serde(default)]
    pub evaluation_due: bool,
    /// Progress status.
    #[serde(default)]
    pub status: SessionStatus,
    /// Attendance roster.
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
    /// Lesson journal.
    #[serde(default)]
    pub journal: Journal,
    /// Reschedule provenance, oldest move first. Empty unless moved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moves: Vec<SessionMove>,
}

impl Session {
    /// Creates a planned session at the given slot.
    pub fn new(
        id: impl Into<String>,
        cycle_id: impl Into<String>,
        number: u32,
        slot: Slot,
        theme: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            cycle_id: cycle_id.into(),
            number,
            date: slot.date,
            time: Some(slot.time),
            theme: theme.into(),
            locked: false,
            evaluation_due: false,
            status: SessionStatus::Planned,
            attendance: Vec::new(),
            journal: Journal::default(),
            moves: Vec::new(),
        }
    }

    /// The slot this session occupies, using [`DEFAULT_SLOT_TIME`] when it has no time.
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.time.unwrap_or(DEFAULT_SLOT_TIME))
    }

    /// Returns true while the session sits on a rescheduled slot.
    pub fn is_rescheduled(&self) -> bool {
        !self.moves.is_empty()
    }

    /// The absence responsible for the current position, if the session was moved.
    pub fn absence_origin_id(&self) -> Option<&str> {
        self.moves.last().map(|m| m.absence_id.as_str())
    }

    /// The date the session held before its most recent move.
    pub fn original_date(&self) -> Option<NaiveDate> {
        self.moves.last().map(|m| m.from_date)
    }

    /// The slot the session returns to once every move is undone, or
    /// `None` if it never moved.
    pub fn home_slot(&self) -> Option<Slot> {
        self.moves.first().map(|m| {
            Slot::new(m.from_date, m.from_time.unwrap_or(DEFAULT_SLOT_TIME))
        })
    }

    /// Returns true if the given absence is anywhere in the provenance chain.
    pub fn was_moved_by(&self, absence_id: &str) -> bool {
        self.moves.iter().any(|m| m.absence_id == absence_id)
    }

    /// Moves the session to `to`, pushing a provenance entry for `absence_id`.
    pub fn apply_move(&mut self, absence_id: &str, to: Slot) {
        self.moves.push(SessionMove {
            absence_id: absence_id.to_string(),
            from_date: self.date,
            from_time: self.time,
        });
        self.date = to.date;
        self.time = Some(to.time);
    }

    /// Undoes the move recorded for `absence_id`. Returns false when that
    /// absence never moved this session.
    ///
    /// When the absence is the latest mover, the session goes back to the
    /// recorded slot. When a later absence moved it again, only the entry is
    /// dropped and its pre-move slot is handed to the next entry, so that
    /// undoing the later absence still lands on the earliest slot.
    ///
    /// # Example
    ///
    /// ```
    /// use gradebook_engine::models::{Session, Slot};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    /// let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
    ///
    /// let mut session = Session::new("s1", "cy1", 1, Slot::new(day(8), eight), "Dribble");
    /// session.apply_move("abs-a", Slot::new(day(15), eight));
    /// session.apply_move("abs-b", Slot::new(day(22), eight));
    ///
    /// assert!(session.revert_move("abs-a"));
    /// assert_eq!(session.date, day(22));
    /// assert!(session.revert_move("abs-b"));
    /// assert_eq!(session.date, day(8));
    /// assert!(!session.is_rescheduled());
    /// ```
    pub fn revert_move(&mut self, absence_id: &str) -> bool {
        let Some(position) = self.moves.iter().position(|m| m.absence_id == absence_id) else {
            return false;
        };

        let undone = self.moves.remove(position);
        match self.moves.get_mut(position) {
            Some(next) => {
                next.from_date = undone.from_date;
                next.from_time = undone.from_time;
            }
            None => {
                self.date = undone.from_date;
                self.time = undone.from_time;
            }
        }
        true
    }

    /// Stores the attendance roster and marks attendance as taken.
    ///
    /// An already evaluated session keeps its `Evaluated` status.
    pub fn record_attendance(&mut self, roster: Vec<AttendanceEntry>) {
        self.attendance = roster;
        if self.status == SessionStatus::Planned {
            self.status = SessionStatus::AttendanceTaken;
        }
    }

    /// Replaces the lesson journal.
    pub fn write_journal(&mut self, journal: Journal) {
        self.journal = journal;
    }

    /// Marks the session as evaluated.
    pub fn mark_evaluated(&mut self) {
        self.status = SessionStatus::Evaluated;
    }

    /// Locks the session once it has taken place.
    pub fn lock(&mut self) {
        self.locked = true;
    }
}
