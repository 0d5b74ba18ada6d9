//! Cycle model: a teaching unit of one activity for one class.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Level, Session};
use crate::error::{EngineError, EngineResult};

/// Progress of a cycle as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    /// Sessions are scheduled.
    #[default]
    Planned,
    /// All sessions have taken place.
    Completed,
    /// The summative evaluation has been entered.
    Evaluated,
}

/// A teaching cycle: one activity taught to one class over a fixed number
/// of sessions within a module and semester.
///
/// The cycle exclusively owns its sessions. Rescheduling moves sessions
/// but never adds or removes any, so `sessions.len()` stays equal to
/// `planned_sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// Unique identifier for the cycle.
    pub id: String,
    /// Owning class.
    pub class_id: String,
    /// Denormalized class name.
    pub class_name: String,
    /// Academic level of the class.
    pub level: Level,
    /// The sport or activity taught (APS).
    pub activity: String,
    /// Curriculum module number (1-6).
    pub module: u8,
    /// Semester (1-2).
    pub semester: u8,
    /// Number of sessions requested at creation.
    pub planned_sessions: u32,
    /// Sessions of the cycle.
    #[serde(default)]
    pub sessions: Vec<Session>,
    /// Progress status.
    #[serde(default)]
    pub status: CycleStatus,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cycle {
    /// Looks up a session by ID.
    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Looks up a session by ID for mutation.
    pub fn session_mut(&mut self, session_id: &str) -> EngineResult<&mut Session> {
        let cycle_id = self.id.clone();
        self.sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| EngineError::SessionNotFound {
                cycle_id,
                session_id: session_id.to_string(),
            })
    }

    /// The session flagged for the summative evaluation.
    pub fn evaluation_session(&self) -> Option<&Session> {
        self.sessions.iter().find(|s| s.evaluation_due)
    }

    /// Records a modification.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}
