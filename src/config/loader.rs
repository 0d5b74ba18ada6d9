//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading planner
//! settings and the curriculum from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Level;

use super::types::{Curriculum, PlannerSettings};

/// Loads and provides access to the gradebook configuration.
///
/// # Directory Structure
///
/// ```text
/// config/gradebook/
/// ├── planner.yaml     # Scheduling settings
/// └── curriculum.yaml  # Modules, activities and session themes
/// ```
///
/// # Example
///
/// ```no_run
/// use gradebook_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/gradebook").unwrap();
/// println!("Search horizon: {} weeks", loader.settings().scheduling.search_horizon_weeks);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: PlannerSettings,
    curriculum: Curriculum,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/gradebook")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML
    /// - The values fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PlannerSettings>(&path.join("planner.yaml"))?;
        let curriculum = Self::load_yaml::<Curriculum>(&path.join("curriculum.yaml"))?;

        Self::from_parts(settings, curriculum)
    }

    /// Builds a loader from already parsed parts, validating them.
    pub fn from_parts(settings: PlannerSettings, curriculum: Curriculum) -> EngineResult<Self> {
        Self::validate_settings(&settings)?;
        Self::validate_curriculum(&curriculum)?;
        Ok(Self {
            settings,
            curriculum,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settings(settings: &PlannerSettings) -> EngineResult<()> {
        if settings.scheduling.search_horizon_weeks == 0 {
            return Err(EngineError::InvalidConfig {
                message: "scheduling.search_horizon_weeks must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn validate_curriculum(curriculum: &Curriculum) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for module in &curriculum.modules {
            if !(1..=6).contains(&module.number) {
                return Err(EngineError::InvalidConfig {
                    message: format!("module number {} is outside 1-6", module.number),
                });
            }
            if !seen.insert(module.number) {
                return Err(EngineError::InvalidConfig {
                    message: format!("module {} is declared twice", module.number),
                });
            }
            let expected = expected_level(module.number);
            if module.level != expected {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "module {} belongs to level {}, not {}",
                        module.number, expected, module.level
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the planner settings.
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Returns the curriculum.
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }
}

/// Modules 1-2 are common core, 3-4 first year, 5-6 second year.
fn expected_level(module: u8) -> Level {
    match module {
        1 | 2 => Level::CommonCore,
        3 | 4 => Level::FirstYear,
        _ => Level::SecondYear,
    }
}
