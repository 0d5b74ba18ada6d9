//! Core data models for the gradebook engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod class;
mod cycle;
mod evaluation;
mod session;
mod slot;
mod time_of_day;

pub use absence::{AbsenceDraft, AbsenceKind, AbsenceStatus, DateWindow, TeacherAbsence};
pub use class::{Class, Level, Student};
pub use cycle::{Cycle, CycleStatus};
pub use evaluation::{Dimension, Dims, Evaluation, upsert_evaluation};
pub use session::{
    AttendanceEntry, AttendanceStatus, Behaviour, Journal, Session, SessionMove, SessionStatus,
    roster_for_students,
};
pub use slot::{DEFAULT_SLOT_TIME, Slot, WeeklySlot};
pub use time_of_day::{format_time, hhmm, parse_time};
