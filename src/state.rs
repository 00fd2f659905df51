//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Database;
use crate::startup::Readiness;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, the database handle and the
/// readiness flag written by the startup gate.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub readiness: Readiness,
}

impl AppState {
    /// Creates a new application state from the given configuration, database and readiness flag.
    pub fn new(config: AppConfig, db: Database, readiness: Readiness) -> Self {
        Self {
            config: Arc::new(config),
            db,
            readiness,
        }
    }
}
