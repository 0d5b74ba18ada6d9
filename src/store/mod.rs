//! Persistence boundary for the gradebook document.
//!
//! Everything the engine persists lives in one [`GradebookDocument`]. Stores
//! read and write it whole: every lifecycle operation loads the document,
//! computes the new state and saves it back.

mod file;
mod memory;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Class, Cycle, Evaluation, Student, TeacherAbsence, WeeklySlot};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// The whole persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradebookDocument {
    /// Classes with their weekly timetables.
    #[serde(default)]
    pub classes: Vec<Class>,
    /// Students of every class.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Teaching cycles and their sessions.
    #[serde(default)]
    pub cycles: Vec<Cycle>,
    /// Teacher absences.
    #[serde(default)]
    pub absences: Vec<TeacherAbsence>,
    /// Recorded evaluations.
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

impl GradebookDocument {
    /// Looks up a class by ID.
    pub fn class(&self, class_id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    /// Weekly slots of a class; empty when the class is unknown.
    pub fn class_patterns(&self, class_id: &str) -> &[WeeklySlot] {
        self.class(class_id)
            .map(|c| c.slots.as_slice())
            .unwrap_or(&[])
    }

    /// Looks up an absence by ID.
    pub fn absence(&self, absence_id: &str) -> EngineResult<&TeacherAbsence> {
        self.absences
            .iter()
            .find(|a| a.id == absence_id)
            .ok_or_else(|| EngineError::AbsenceNotFound {
                id: absence_id.to_string(),
            })
    }

    /// Looks up an absence by ID for mutation.
    pub fn absence_mut(&mut self, absence_id: &str) -> EngineResult<&mut TeacherAbsence> {
        self.absences
            .iter_mut()
            .find(|a| a.id == absence_id)
            .ok_or_else(|| EngineError::AbsenceNotFound {
                id: absence_id.to_string(),
            })
    }
}

/// Atomic whole-document load and save.
pub trait DocumentStore: Send + Sync {
    /// Reads the current document. A store that was never written yields
    /// an empty document.
    fn load(&self) -> EngineResult<GradebookDocument>;

    /// Replaces the stored document.
    fn save(&self, document: &GradebookDocument) -> EngineResult<()>;
}
