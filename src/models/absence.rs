//! Teacher absence models.
//!
//! This module contains the [`TeacherAbsence`] record, its lifecycle status,
//! and the [`DateWindow`] type used for every closed date interval.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A closed, inclusive interval of calendar dates.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::DateWindow;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
/// let window = DateWindow::new(day(8), day(12)).unwrap();
///
/// assert!(window.contains(day(8)));   // start
/// assert!(window.contains(day(12)));  // end
/// assert!(!window.contains(day(13)));
/// assert!(DateWindow::new(day(12), day(8)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` lies within the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Reason category of a teacher absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    /// Sick leave.
    Illness,
    /// Accompanying students to a competition.
    Competition,
    /// Professional training.
    Training,
    /// Public holiday.
    PublicHoliday,
    /// Leave.
    Leave,
    /// Anything else.
    #[default]
    Other,
}

/// Lifecycle status of a teacher absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceStatus {
    /// Recorded, no scheduling effect yet.
    #[default]
    Pending,
    /// Approved: impacted sessions have been rescheduled.
    Approved,
    /// Rejected: no scheduling effect.
    Rejected,
}

impl std::fmt::Display for AbsenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsenceStatus::Pending => write!(f, "pending"),
            AbsenceStatus::Approved => write!(f, "approved"),
            AbsenceStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The user-editable part of an absence, as submitted by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceDraft {
    /// First day of absence.
    pub start_date: NaiveDate,
    /// Last day of absence (inclusive).
    pub end_date: NaiveDate,
    /// Reason category.
    #[serde(default)]
    pub kind: AbsenceKind,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl AbsenceDraft {
    /// The validated date window of the draft.
    pub fn window(&self) -> EngineResult<DateWindow> {
        DateWindow::new(self.start_date, self.end_date)
    }
}

/// A teacher absence over a closed date interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherAbsence {
    /// Unique identifier.
    pub id: String,
    /// First day of absence.
    pub start_date: NaiveDate,
    /// Last day of absence (inclusive).
    pub end_date: NaiveDate,
    /// Reason category.
    #[serde(default)]
    pub kind: AbsenceKind,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: AbsenceStatus,
    /// When the absence was first recorded.
    pub created_at: DateTime<Utc>,
    /// IDs of the sessions this absence moved.
    #[serde(default)]
    pub impacted_sessions: Vec<String>,
}

impl TeacherAbsence {
    /// Creates a pending absence from a draft, validating its date range.
    ///
    /// # Example
    ///
    /// ```
    /// use gradebook_engine::models::{AbsenceDraft, AbsenceKind, AbsenceStatus, TeacherAbsence};
    /// use chrono::{NaiveDate, Utc};
    ///
    /// let draft = AbsenceDraft {
    ///     start_date: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
    ///     kind: AbsenceKind::Illness,
    ///     reason: "flu".to_string(),
    /// };
    /// let absence = TeacherAbsence::from_draft("abs-1", draft, Utc::now()).unwrap();
    /// assert_eq!(absence.status, AbsenceStatus::Pending);
    /// ```
    pub fn from_draft(
        id: impl Into<String>,
        draft: AbsenceDraft,
        created_at: DateTime<Utc>,
    ) -> EngineResult<Self> {
        draft.window()?;
        Ok(Self {
            id: id.into(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            kind: draft.kind,
            reason: draft.reason,
            status: AbsenceStatus::Pending,
            created_at,
            impacted_sessions: Vec::new(),
        })
    }

    /// The absence interval, or `InvalidDateRange` if the stored dates are
    /// inverted.
    pub fn window(&self) -> EngineResult<DateWindow> {
        DateWindow::new(self.start_date, self.end_date)
    }

    /// Returns true if the absence is approved and covers `date`.
    ///
    /// An absence with inverted dates covers nothing.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.status == AbsenceStatus::Approved
            && self.window().is_ok_and(|window| window.contains(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn create_test_draft(start: u32, end: u32) -> AbsenceDraft {
        AbsenceDraft {
            start_date: date(start),
            end_date: date(end),
            kind: AbsenceKind::Training,
            reason: "stage".to_string(),
        }
    }

    #[test]
    fn test_single_day_window_is_valid() {
        let window = DateWindow::new(date(8), date(8)).unwrap();
        assert!(window.contains(date(8)));
        assert!(!window.contains(date(7)));
        assert!(!window.contains(date(9)));
    }

    #[test]
    fn test_inverted_draft_is_rejected() {
        let result = TeacherAbsence::from_draft("abs-1", create_test_draft(10, 8), Utc::now());
        match result {
            Err(EngineError::InvalidDateRange { start, end }) => {
                assert_eq!(start, date(10));
                assert_eq!(end, date(8));
            }
            other => panic!("Expected InvalidDateRange, got {:?}", other),
        }
    }

    #[test]
    fn test_new_absence_is_pending_with_no_impacted_sessions() {
        let absence =
            TeacherAbsence::from_draft("abs-1", create_test_draft(8, 12), Utc::now()).unwrap();
        assert_eq!(absence.status, AbsenceStatus::Pending);
        assert!(absence.impacted_sessions.is_empty());
        assert_eq!(absence.window().unwrap(), DateWindow::new(date(8), date(12)).unwrap());
    }

    #[test]
    fn test_is_active_only_when_approved() {
        let mut absence =
            TeacherAbsence::from_draft("abs-1", create_test_draft(8, 12), Utc::now()).unwrap();
        assert!(!absence.is_active_on(date(10)));

        absence.status = AbsenceStatus::Approved;
        assert!(absence.is_active_on(date(10)));
        assert!(!absence.is_active_on(date(13)));
    }

    #[test]
    fn test_inverted_stored_dates_have_no_window() {
        let mut absence =
            TeacherAbsence::from_draft("abs-1", create_test_draft(8, 12), Utc::now()).unwrap();
        absence.end_date = date(5);
        absence.status = AbsenceStatus::Approved;

        assert!(matches!(
            absence.window(),
            Err(EngineError::InvalidDateRange { .. })
        ));
        assert!(!absence.is_active_on(date(8)));
    }

    #[test]
    fn test_deserialize_kind_and_status() {
        let json = r#"{
            "id": "abs-2",
            "start_date": "2025-10-01",
            "end_date": "2025-10-03",
            "kind": "public_holiday",
            "status": "rejected",
            "created_at": "2025-09-20T08:00:00Z"
        }"#;
        let absence: TeacherAbsence = serde_json::from_str(json).unwrap();
        assert_eq!(absence.kind, AbsenceKind::PublicHoliday);
        assert_eq!(absence.status, AbsenceStatus::Rejected);
        assert_eq!(absence.reason, "");
    }
}
