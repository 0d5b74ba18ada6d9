//! Request types for the gradebook engine API.
//!
//! This module defines the JSON request structures for the absence and
//! grade endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AbsenceDraft, AbsenceKind, Dims, Level};

/// Request body for `POST /absences` and `PUT /absences/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// First day of absence (`YYYY-MM-DD`).
    pub start_date: NaiveDate,
    /// Last day of absence, inclusive (`YYYY-MM-DD`).
    pub end_date: NaiveDate,
    /// Reason category.
    #[serde(default)]
    pub kind: AbsenceKind,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl From<AbsenceRequest> for AbsenceDraft {
    fn from(req: AbsenceRequest) -> Self {
        AbsenceDraft {
            start_date: req.start_date,
            end_date: req.end_date,
            kind: req.kind,
            reason: req.reason.trim().to_string(),
        }
    }
}

/// Request body for `POST /grades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    /// Level whose coefficient table applies.
    pub level: Level,
    /// Raw scores per dimension.
    #[serde(default)]
    pub dims: Dims,
}
