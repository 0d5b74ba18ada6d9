//! HTTP API module for the gradebook engine.
//!
//! This module provides the REST endpoints for the teacher absence
//! lifecycle and final grade calculation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AbsenceRequest, GradeRequest};
pub use response::{ApiError, ApprovalResponse, DeleteResponse};
pub use state::AppState;
