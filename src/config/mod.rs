//! Configuration loading for the gradebook engine.
//!
//! This module loads the planner settings and the curriculum (modules,
//! activities and session themes) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use gradebook_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/gradebook").unwrap();
//! println!("{} modules", config.curriculum().modules.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ActivityPlan, Curriculum, CurriculumModule, PlannerSettings, SchedulingSettings};
