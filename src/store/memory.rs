//! In-memory document store.

use std::sync::Mutex;

use super::{DocumentStore, GradebookDocument};
use crate::error::{EngineError, EngineResult};

/// Keeps the document in memory. Used by tests and embedders that persist
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<GradebookDocument>,
}

impl MemoryStore {
    /// Creates a store holding `document`.
    pub fn new(document: GradebookDocument) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }
}

fn poisoned() -> EngineError {
    EngineError::Storage {
        message: "in-memory document lock poisoned".to_string(),
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> EngineResult<GradebookDocument> {
        let document = self.document.lock().map_err(|_| poisoned())?;
        Ok(document.clone())
    }

    fn save(&self, document: &GradebookDocument) -> EngineResult<()> {
        let mut stored = self.document.lock().map_err(|_| poisoned())?;
        *stored = document.clone();
        Ok(())
    }
}
