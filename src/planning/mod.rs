//! Session planning for the gradebook engine.
//!
//! This module generates session slots from weekly timetables, keeps
//! session order consistent, moves sessions out of teacher absences and
//! undoes those moves, and builds new cycles from the curriculum.

mod attendance;
mod cycle_builder;
mod reschedule;
mod sequencer;
mod slots;

pub use attendance::{AttendanceSummary, attendance_rate, attendance_summary};
pub use cycle_builder::{CycleRequest, build_cycle, build_cycles_for_level};
pub use reschedule::{
    MovedSession, NextFreeSlot, RescheduleOutcome, RescheduleStrategy, Rescheduler,
    UnplacedReason, UnplacedSession, reschedule, reverse, reverse_in_place,
};
pub use sequencer::{normalize, normalize_cycle};
pub use slots::{DEFAULT_HORIZON_WEEKS, SlotGenerator, generate_slots};
