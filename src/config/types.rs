//! Configuration types for the gradebook planner.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::Level;
use crate::planning::DEFAULT_HORIZON_WEEKS;

fn default_horizon_weeks() -> u32 {
    DEFAULT_HORIZON_WEEKS
}

/// Scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulingSettings {
    /// Number of calendar weeks searched for a free slot.
    #[serde(default = "default_horizon_weeks")]
    pub search_horizon_weeks: u32,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            search_horizon_weeks: DEFAULT_HORIZON_WEEKS,
        }
    }
}

/// Planner settings file structure (`planner.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlannerSettings {
    /// Scheduling settings.
    #[serde(default)]
    pub scheduling: SchedulingSettings,
}

/// An activity taught in a module, with its ordered session themes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivityPlan {
    /// Activity name as written in cycles (e.g. "Basket-ball").
    pub name: String,
    /// Theme of each session, in order.
    #[serde(default)]
    pub themes: Vec<String>,
}

/// A curriculum module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurriculumModule {
    /// Module number (1-6).
    pub number: u8,
    /// Level the module is taught at.
    pub level: Level,
    /// Module title.
    #[serde(default)]
    pub title: String,
    /// Activities of the module.
    #[serde(default)]
    pub activities: Vec<ActivityPlan>,
}

/// The curriculum file structure (`curriculum.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Curriculum {
    /// All modules.
    #[serde(default)]
    pub modules: Vec<CurriculumModule>,
}

impl Curriculum {
    /// Looks up a module by number.
    pub fn module(&self, number: u8) -> Option<&CurriculumModule> {
        self.modules.iter().find(|m| m.number == number)
    }

    /// The level a module is taught at.
    pub fn level_for_module(&self, number: u8) -> Option<Level> {
        self.module(number).map(|m| m.level)
    }

    /// Session themes for an activity within a module.
    ///
    /// Activity names match case-insensitively. Unknown modules or
    /// activities yield an empty slice.
    pub fn themes(&self, module: u8, activity: &str) -> &[String] {
        let wanted = activity.trim().to_lowercase();
        self.module(module)
            .and_then(|m| {
                m.activities
                    .iter()
                    .find(|a| a.name.trim().to_lowercase() == wanted)
            })
            .map(|a| a.themes.as_slice())
            .unwrap_or(&[])
    }

    /// Activity names offered by a module.
    pub fn activities(&self, module: u8) -> Vec<&str> {
        self.module(module)
            .map(|m| m.activities.iter().map(|a| a.name.as_str()).collect())
            .unwrap_or_default()
    }
}
