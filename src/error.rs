//! Error types for the gradebook engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can stop an operation. Domain conditions that are
//! not failures (a session that could not be rescheduled, an absence approved
//! twice) are reported in return values instead.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the gradebook engine.
///
/// # Example
///
/// ```
/// use gradebook_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::InvalidDateRange {
///     start: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid date range: start 2025-09-10 is after end 2025-09-08"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// An absence (or any closed interval) whose start falls after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// First day of the interval.
        start: NaiveDate,
        /// Last day of the interval.
        end: NaiveDate,
    },

    /// A time-of-day string that is not `HH:MM`.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A class definition that breaks a class invariant.
    #[error("Invalid class '{class_id}': {message}")]
    InvalidClass {
        /// The ID of the offending class.
        class_id: String,
        /// A description of what made the class invalid.
        message: String,
    },

    /// Sessions were requested for a class with no weekly slot.
    #[error("No weekly schedule defined for class '{class_id}'")]
    NoWeeklySchedule {
        /// The class without slots.
        class_id: String,
    },

    /// A cycle creation request with out-of-range values.
    #[error("Invalid cycle request: {message}")]
    InvalidCycleRequest {
        /// What is wrong with the request.
        message: String,
    },

    /// No teacher absence with this ID exists in the document.
    #[error("Absence not found: {id}")]
    AbsenceNotFound {
        /// The ID that was looked up.
        id: String,
    },

    /// No cycle with this ID exists in the document.
    #[error("Cycle not found: {id}")]
    CycleNotFound {
        /// The ID that was looked up.
        id: String,
    },

    /// No session with this ID exists in the cycle.
    #[error("Session '{session_id}' not found in cycle '{cycle_id}'")]
    SessionNotFound {
        /// The cycle that was searched.
        cycle_id: String,
        /// The session ID that was looked up.
        session_id: String,
    },

    /// A status change that the absence lifecycle does not allow.
    #[error("Absence '{id}' cannot go from {from} to {to}")]
    InvalidTransition {
        /// The absence ID.
        id: String,
        /// Current status.
        from: String,
        /// Requested status or action.
        to: String,
    },

    /// The document store failed to read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
