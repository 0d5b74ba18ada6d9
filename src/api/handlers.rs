//! HTTP request handlers for the gradebook engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::AbsenceDraft;
use crate::scoring::grade_breakdown;

use super::request::{AbsenceRequest, GradeRequest};
use super::response::{ApiError, ApiErrorResponse, ApprovalResponse, DeleteResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/absences", post(create_absence).get(list_absences))
        .route("/absences/:id", put(update_absence).delete(delete_absence))
        .route("/absences/:id/approve", post(approve_absence))
        .route("/absences/:id/reject", post(reject_absence))
        .route("/grades", post(compute_grade))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for GET /absences.
async fn list_absences(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let service = state.service().lock().await;
    match service.list() {
        Ok(absences) => json_response(StatusCode::OK, absences),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /absences.
///
/// Records a pending absence and returns it with status 201.
async fn create_absence(
    State(state): State<AppState>,
    payload: Result<Json<AbsenceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing absence creation");

    let draft: AbsenceDraft = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let service = state.service().lock().await;
    match service.create(draft) {
        Ok(absence) => json_response(StatusCode::CREATED, absence),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for PUT /absences/:id.
async fn update_absence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AbsenceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, absence_id = %id, "Processing absence update");

    let draft: AbsenceDraft = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let service = state.service().lock().await;
    match service.update(&id, draft) {
        Ok(absence) => json_response(StatusCode::OK, absence),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /absences/:id/approve.
///
/// Approves the absence, reschedules impacted sessions and reports the
/// outcome with a user-facing message.
async fn approve_absence(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, absence_id = %id, "Processing absence approval");

    let start_time = Instant::now();
    let service = state.service().lock().await;
    match service.approve(&id) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                absence_id = %id,
                moved = report.moved_count,
                unplaced = report.unplaced_count(),
                duration_us = start_time.elapsed().as_micros(),
                "Approval completed"
            );
            json_response(StatusCode::OK, ApprovalResponse::from(report))
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /absences/:id/reject.
async fn reject_absence(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, absence_id = %id, "Processing absence rejection");

    let service = state.service().lock().await;
    match service.reject(&id) {
        Ok(absence) => json_response(StatusCode::OK, absence),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for DELETE /absences/:id.
async fn delete_absence(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, absence_id = %id, "Processing absence deletion");

    let service = state.service().lock().await;
    match service.delete(&id) {
        Ok(restored_sessions) => json_response(
            StatusCode::OK,
            DeleteResponse {
                absence_id: id,
                restored_sessions,
            },
        ),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /grades.
///
/// Returns the final grade together with its per-dimension working.
async fn compute_grade(payload: Result<Json<GradeRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let breakdown = grade_breakdown(request.level, &request.dims);
    info!(
        correlation_id = %correlation_id,
        level = %request.level,
        final_grade = %breakdown.final_grade,
        "Grade computed"
    );
    json_response(StatusCode::OK, breakdown)
}
