//! Attendance aggregation over a cycle.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{AttendanceStatus, Cycle};

/// Attendance counts over every recorded roster entry of a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    /// Roster entries recorded across all sessions.
    pub recorded: u32,
    /// Entries marked present.
    pub present: u32,
    /// Entries marked late.
    pub late: u32,
    /// Entries marked absent.
    pub absent: u32,
    /// Entries marked excused.
    pub excused: u32,
}

impl AttendanceSummary {
    /// Share of entries that attended (present or late), rounded to four
    /// decimal places. Zero when nothing was recorded.
    pub fn rate(&self) -> Decimal {
        if self.recorded == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.present + self.late) / Decimal::from(self.recorded)).round_dp(4)
    }
}

/// Counts attendance over every session of `cycle`.
pub fn attendance_summary(cycle: &Cycle) -> AttendanceSummary {
    cycle
        .sessions
        .iter()
        .flat_map(|s| s.attendance.iter())
        .fold(AttendanceSummary::default(), |mut summary, entry| {
            summary.recorded += 1;
            match entry.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
            summary
        })
}

/// Share of present or late entries over all recorded entries of `cycle`.
pub fn attendance_rate(cycle: &Cycle) -> Decimal {
    attendance_summary(cycle).rate()
}
