//! JSON file document store.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DocumentStore, GradebookDocument};
use crate::error::{EngineError, EngineResult};

/// Stores the document as pretty-printed JSON in a single file.
///
/// Saves write a sibling temporary file and rename it over the target, so
/// a reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> EngineError {
        EngineError::Storage {
            message: format!("{} {}: {}", action, self.path.display(), err),
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> EngineResult<GradebookDocument> {
        if !self.path.exists() {
            return Ok(GradebookDocument::default());
        }

        let file = File::open(&self.path).map_err(|e| self.storage_error("cannot open", e))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| self.storage_error("cannot parse", e))
    }

    fn save(&self, document: &GradebookDocument) -> EngineResult<()> {
        let temp = self.temp_path();

        let file = File::create(&temp).map_err(|e| self.storage_error("cannot create", e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document)
            .map_err(|e| self.storage_error("cannot serialize", e))?;
        writer
            .flush()
            .map_err(|e| self.storage_error("cannot write", e))?;

        fs::rename(&temp, &self.path).map_err(|e| self.storage_error("cannot replace", e))?;
        debug!(path = %self.path.display(), "Document saved");
        Ok(())
    }
}
