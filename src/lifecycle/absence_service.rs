//! Teacher absence lifecycle.
//!
//! Absences are created pending. Approving one reschedules every cycle it
//! impacts; rejecting or deleting an approved absence first undoes those
//! moves. Each operation loads the whole document, computes the new state
//! and saves it back.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SchedulingSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceDraft, AbsenceStatus, DateWindow, TeacherAbsence};
use crate::planning::{Rescheduler, UnplacedReason, UnplacedSession, reverse_in_place};
use crate::store::{DocumentStore, GradebookDocument};

/// Result of approving an absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalReport {
    /// The approved absence.
    pub absence_id: String,
    /// Sessions moved by this approval.
    pub moved_count: usize,
    /// Impacted sessions left in place.
    pub unplaced: Vec<UnplacedSession>,
    /// Cycles whose sessions moved.
    pub cycles_modified: Vec<String>,
}

impl ApprovalReport {
    /// Number of impacted sessions left in place.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// A short summary for the user.
    ///
    /// # Example
    ///
    /// ```
    /// use gradebook_engine::lifecycle::ApprovalReport;
    ///
    /// let report = ApprovalReport {
    ///     absence_id: "abs-1".to_string(),
    ///     moved_count: 3,
    ///     unplaced: vec![],
    ///     cycles_modified: vec!["cy-1".to_string()],
    /// };
    /// assert_eq!(report.message(), "3 session(s) rescheduled");
    /// ```
    pub fn message(&self) -> String {
        if self.moved_count > 0 {
            let mut message = format!("{} session(s) rescheduled", self.moved_count);
            if !self.unplaced.is_empty() {
                message.push_str(&format!(
                    ", {} could not be rescheduled",
                    self.unplaced.len()
                ));
            }
            return message;
        }

        let no_schedule = self
            .unplaced
            .iter()
            .any(|u| u.reason == UnplacedReason::NoWeeklySchedule);
        if no_schedule {
            "could not reschedule: no weekly schedule defined for this class".to_string()
        } else if !self.unplaced.is_empty() {
            "could not reschedule: no free slot within the search horizon".to_string()
        } else {
            "no sessions needed rescheduling".to_string()
        }
    }
}

/// Creates, edits, approves, rejects and deletes teacher absences.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gradebook_engine::config::SchedulingSettings;
/// use gradebook_engine::lifecycle::AbsenceService;
/// use gradebook_engine::models::{AbsenceDraft, AbsenceKind};
/// use gradebook_engine::store::MemoryStore;
/// use chrono::NaiveDate;
///
/// let service = AbsenceService::new(Arc::new(MemoryStore::default()), SchedulingSettings::default());
/// let absence = service.create(AbsenceDraft {
///     start_date: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
///     kind: AbsenceKind::Training,
///     reason: String::new(),
/// }).unwrap();
///
/// let report = service.approve(&absence.id).unwrap();
/// assert_eq!(report.message(), "no sessions needed rescheduling");
/// ```
pub struct AbsenceService {
    store: Arc<dyn DocumentStore>,
    settings: SchedulingSettings,
}

impl AbsenceService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<dyn DocumentStore>, settings: SchedulingSettings) -> Self {
        Self { store, settings }
    }

    /// All absences, in creation order.
    pub fn list(&self) -> EngineResult<Vec<TeacherAbsence>> {
        Ok(self.store.load()?.absences)
    }

    /// Records a new pending absence.
    ///
    /// # Returns
    ///
    /// Returns the stored absence, or `InvalidDateRange` if the draft ends
    /// before it starts. Nothing is persisted on error.
    pub fn create(&self, draft: AbsenceDraft) -> EngineResult<TeacherAbsence> {
        let absence = TeacherAbsence::from_draft(Uuid::new_v4().to_string(), draft, Utc::now())?;

        let mut document = self.store.load()?;
        document.absences.push(absence.clone());
        self.store.save(&document)?;

        info!(
            absence_id = %absence.id,
            start = %absence.start_date,
            end = %absence.end_date,
            "Absence created"
        );
        Ok(absence)
    }

    /// Edits the dates, kind and reason of an absence that is not approved.
    pub fn update(&self, absence_id: &str, draft: AbsenceDraft) -> EngineResult<TeacherAbsence> {
        draft.window()?;

        let mut document = self.store.load()?;
        let absence = document.absence_mut(absence_id)?;
        if absence.status == AbsenceStatus::Approved {
            return Err(EngineError::InvalidTransition {
                id: absence_id.to_string(),
                from: absence.status.to_string(),
                to: "edited".to_string(),
            });
        }

        absence.start_date = draft.start_date;
        absence.end_date = draft.end_date;
        absence.kind = draft.kind;
        absence.reason = draft.reason;
        let updated = absence.clone();
        self.store.save(&document)?;

        info!(absence_id, "Absence updated");
        Ok(updated)
    }

    /// Approves an absence and reschedules every impacted session.
    ///
    /// Sessions are never moved into another approved absence. Approving an
    /// already approved absence moves nothing and reports zero moves.
    pub fn approve(&self, absence_id: &str) -> EngineResult<ApprovalReport> {
        let mut document = self.store.load()?;
        let absence = document.absence(absence_id)?.clone();
        if absence.status == AbsenceStatus::Rejected {
            return Err(EngineError::InvalidTransition {
                id: absence_id.to_string(),
                from: absence.status.to_string(),
                to: AbsenceStatus::Approved.to_string(),
            });
        }

        let rescheduler = Rescheduler::new()
            .with_horizon(self.settings.search_horizon_weeks)
            .block_all(other_approved_windows(&document, absence_id)?);

        let now = Utc::now();
        let mut report = ApprovalReport {
            absence_id: absence_id.to_string(),
            moved_count: 0,
            unplaced: Vec::new(),
            cycles_modified: Vec::new(),
        };
        let mut impacted = Vec::new();

        let mut cycles = Vec::with_capacity(document.cycles.len());
        for cycle in std::mem::take(&mut document.cycles) {
            let patterns = document.class_patterns(&cycle.class_id);
            let mut outcome = rescheduler.reschedule(cycle, &absence, patterns)?;

            if outcome.changed() {
                outcome.cycle.touch(now);
                report.cycles_modified.push(outcome.cycle.id.clone());
                impacted.extend(outcome.moves.iter().map(|m| m.session_id.clone()));
            }
            report.moved_count += outcome.moved_count;
            report.unplaced.append(&mut outcome.unplaced);
            cycles.push(outcome.cycle);
        }
        document.cycles = cycles;

        let stored = document.absence_mut(absence_id)?;
        stored.status = AbsenceStatus::Approved;
        for session_id in impacted {
            if !stored.impacted_sessions.contains(&session_id) {
                stored.impacted_sessions.push(session_id);
            }
        }
        self.store.save(&document)?;

        if report.unplaced.is_empty() {
            info!(
                absence_id,
                moved = report.moved_count,
                cycles = report.cycles_modified.len(),
                "Absence approved"
            );
        } else {
            warn!(
                absence_id,
                moved = report.moved_count,
                unplaced = report.unplaced.len(),
                "Absence approved with unplaced sessions"
            );
        }
        Ok(report)
    }

    /// Rejects an absence, undoing its moves first if it was approved.
    pub fn reject(&self, absence_id: &str) -> EngineResult<TeacherAbsence> {
        let mut document = self.store.load()?;
        let was_approved = document.absence(absence_id)?.status == AbsenceStatus::Approved;

        let restored = if was_approved {
            reverse_everywhere(&mut document, absence_id)
        } else {
            0
        };

        let absence = document.absence_mut(absence_id)?;
        absence.status = AbsenceStatus::Rejected;
        absence.impacted_sessions.clear();
        let rejected = absence.clone();
        self.store.save(&document)?;

        info!(absence_id, restored, "Absence rejected");
        Ok(rejected)
    }

    /// Deletes an absence, undoing its moves first if it was approved.
    ///
    /// Returns the number of sessions restored.
    pub fn delete(&self, absence_id: &str) -> EngineResult<usize> {
        let mut document = self.store.load()?;
        let was_approved = document.absence(absence_id)?.status == AbsenceStatus::Approved;

        let restored = if was_approved {
            reverse_everywhere(&mut document, absence_id)
        } else {
            0
        };
        document.absences.retain(|a| a.id != absence_id);
        self.store.save(&document)?;

        info!(absence_id, restored, "Absence deleted");
        Ok(restored)
    }

    /// Approved absences covering `date`.
    pub fn active_on(&self, date: NaiveDate) -> EngineResult<Vec<TeacherAbsence>> {
        Ok(self
            .store
            .load()?
            .absences
            .into_iter()
            .filter(|a| a.is_active_on(date))
            .collect())
    }
}

fn other_approved_windows(
    document: &GradebookDocument,
    absence_id: &str,
) -> EngineResult<Vec<DateWindow>> {
    document
        .absences
        .iter()
        .filter(|a| a.id != absence_id && a.status == AbsenceStatus::Approved)
        .map(|a| a.window())
        .collect()
}

fn reverse_everywhere(document: &mut GradebookDocument, absence_id: &str) -> usize {
    let now = Utc::now();
    document
        .cycles
        .iter_mut()
        .map(|cycle| {
            let restored = reverse_in_place(cycle, absence_id);
            if restored > 0 {
                cycle.touch(now);
            }
            restored
        })
        .sum()
}
