//! Cycle creation from a class timetable and the curriculum.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::sequencer::normalize;
use super::slots::generate_slots;
use crate::config::Curriculum;
use crate::error::{EngineError, EngineResult};
use crate::models::{Class, Cycle, CycleStatus, Level, Session};

/// What to create: one activity, its module and semester, and how many
/// sessions from which date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRequest {
    /// The sport or activity taught.
    pub activity: String,
    /// Curriculum module (1-6).
    pub module: u8,
    /// Semester (1-2).
    pub semester: u8,
    /// Number of sessions to schedule.
    pub session_count: u32,
    /// First date a session may fall on.
    pub start_date: NaiveDate,
}

impl CycleRequest {
    /// Checks the module, semester and session count ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=6).contains(&self.module) {
            return Err(EngineError::InvalidCycleRequest {
                message: format!("module {} is outside 1-6", self.module),
            });
        }
        if !(1..=2).contains(&self.semester) {
            return Err(EngineError::InvalidCycleRequest {
                message: format!("semester {} is outside 1-2", self.semester),
            });
        }
        if self.session_count == 0 {
            return Err(EngineError::InvalidCycleRequest {
                message: "at least one session is required".to_string(),
            });
        }
        if self.activity.trim().is_empty() {
            return Err(EngineError::InvalidCycleRequest {
                message: "activity is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Creates a cycle for `class`, scheduling its sessions on the class's
/// weekly slots from the request's start date.
///
/// Session `i` takes the curriculum theme `i` of the module's activity, or
/// `Session {i + 1}` past the end of the list.
///
/// # Returns
///
/// Returns the new cycle, or an error if:
/// - The request is out of range (`InvalidCycleRequest`)
/// - The class has no weekly slot (`NoWeeklySchedule`)
pub fn build_cycle(
    class: &Class,
    request: &CycleRequest,
    curriculum: &Curriculum,
) -> EngineResult<Cycle> {
    request.validate()?;

    if !class.has_schedule() {
        return Err(EngineError::NoWeeklySchedule {
            class_id: class.id.clone(),
        });
    }

    let module_level = curriculum.level_for_module(request.module);
    if let Some(level) = module_level.filter(|level| *level != class.level) {
        warn!(
            class_id = %class.id,
            module = request.module,
            "Module is taught at level {}, class is {}",
            level,
            class.level
        );
    }

    let count = request.session_count as usize;
    let slots = generate_slots(request.start_date, count, &class.slots);
    if slots.len() < count {
        return Err(EngineError::InvalidCycleRequest {
            message: format!(
                "only {} of {} sessions fit within the search horizon",
                slots.len(),
                count
            ),
        });
    }

    let cycle_id = Uuid::new_v4().to_string();
    let themes = curriculum.themes(request.module, &request.activity);
    let sessions = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            let theme = themes
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("Session {}", index + 1));
            Session::new(
                Uuid::new_v4().to_string(),
                cycle_id.as_str(),
                index as u32 + 1,
                slot,
                theme,
            )
        })
        .collect();

    Ok(Cycle {
        id: cycle_id,
        class_id: class.id.clone(),
        class_name: class.name.clone(),
        level: class.level,
        activity: request.activity.trim().to_string(),
        module: request.module,
        semester: request.semester,
        planned_sessions: request.session_count,
        sessions: normalize(sessions),
        status: CycleStatus::Planned,
        updated_at: None,
    })
}

/// Creates one cycle per class of `level`.
///
/// Classes without a weekly slot are skipped with a warning.
pub fn build_cycles_for_level(
    classes: &[Class],
    level: Level,
    request: &CycleRequest,
    curriculum: &Curriculum,
) -> EngineResult<Vec<Cycle>> {
    request.validate()?;

    let mut cycles = Vec::new();
    for class in classes.iter().filter(|c| c.level == level) {
        if !class.has_schedule() {
            warn!(class_id = %class.id, "Skipping class without weekly schedule");
            continue;
        }
        cycles.push(build_cycle(class, request, curriculum)?);
    }

    info!(
        level = %level,
        activity = %request.activity,
        created = cycles.len(),
        "Cycles created"
    );
    Ok(cycles)
}
