//! Lifecycle orchestration over the persisted document.
//!
//! This module wires the planning functions to a [`DocumentStore`](crate::store::DocumentStore):
//! approving a teacher absence reschedules every impacted cycle, rejecting
//! or deleting it restores them.

mod absence_service;

pub use absence_service::{AbsenceService, ApprovalReport};
