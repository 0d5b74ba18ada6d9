//! Application state for the gradebook engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ConfigLoader;
use crate::lifecycle::AbsenceService;
use crate::store::DocumentStore;

/// Shared application state.
///
/// The absence service sits behind an async mutex so that each
/// load-compute-save cycle on the document runs alone.
#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<AbsenceService>>,
}

impl AppState {
    /// Creates a new application state around an absence service.
    pub fn new(service: AbsenceService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }

    /// Creates the state from loaded configuration and a document store.
    pub fn from_config(config: &ConfigLoader, store: Arc<dyn DocumentStore>) -> Self {
        Self::new(AbsenceService::new(
            store,
            config.settings().scheduling.clone(),
        ))
    }

    /// Returns the shared absence service.
    pub fn service(&self) -> &Mutex<AbsenceService> {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }
}
