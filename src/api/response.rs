//! Response types for the gradebook engine API.
//!
//! This module defines the success and error response structures and the
//! mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::lifecycle::ApprovalReport;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidDateRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    message,
                    "The absence must end on or after its start date",
                ),
            ),
            EngineError::InvalidTime { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TIME", message),
            ),
            EngineError::InvalidClass { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_CLASS", message),
            ),
            EngineError::InvalidCycleRequest { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_CYCLE_REQUEST", message),
            ),
            EngineError::NoWeeklySchedule { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("NO_WEEKLY_SCHEDULE", message),
            ),
            EngineError::AbsenceNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("ABSENCE_NOT_FOUND", message),
            ),
            EngineError::CycleNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("CYCLE_NOT_FOUND", message),
            ),
            EngineError::SessionNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("SESSION_NOT_FOUND", message),
            ),
            EngineError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("INVALID_TRANSITION", message),
            ),
            EngineError::Storage { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Response body for `POST /absences/:id/approve`.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalResponse {
    /// The approval report.
    #[serde(flatten)]
    pub report: ApprovalReport,
    /// Number of impacted sessions left in place.
    pub unplaced_count: usize,
    /// Summary for the user.
    pub message: String,
}

impl From<ApprovalReport> for ApprovalResponse {
    fn from(report: ApprovalReport) -> Self {
        Self {
            unplaced_count: report.unplaced_count(),
            message: report.message(),
            report,
        }
    }
}

/// Response body for `DELETE /absences/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// The deleted absence.
    pub absence_id: String,
    /// Sessions moved back to their original slot.
    pub restored_sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_date_range_maps_to_bad_request() {
        let engine_error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DATE_RANGE");
        assert!(api_error.error.message.contains("2025-09-10"));
    }

    #[test]
    fn test_absence_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::AbsenceNotFound {
            id: "abs-x".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "ABSENCE_NOT_FOUND");
    }

    #[test]
    fn test_invalid_transition_maps_to_conflict() {
        let api_error: ApiErrorResponse = EngineError::InvalidTransition {
            id: "abs-1".to_string(),
            from: "approved".to_string(),
            to: "edited".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_approval_response_flattens_report() {
        let response: ApprovalResponse = ApprovalReport {
            absence_id: "abs-1".to_string(),
            moved_count: 2,
            unplaced: vec![],
            cycles_modified: vec!["cy-1".to_string()],
        }
        .into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["absence_id"], "abs-1");
        assert_eq!(json["moved_count"], 2);
        assert_eq!(json["unplaced_count"], 0);
        assert_eq!(json["message"], "2 session(s) rescheduled");
    }
}
