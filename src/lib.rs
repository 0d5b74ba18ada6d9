//! Gradebook engine for physical education classes
//!
//! This crate plans teaching cycles onto a class's weekly timetable,
//! reschedules sessions around approved teacher absences (and undoes those
//! moves when an absence is withdrawn), and computes weighted final grades
//! per level.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod planning;
pub mod scoring;
pub mod store;
