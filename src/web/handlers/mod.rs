//! API handlers for the Stowage Web API.

pub mod file;
pub mod storage;

pub use file::*;
pub use storage::*;

use std::sync::Arc;

use crate::Database;

/// Thread-safe database handle shared across handlers.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// Whether deleting a file returns its bytes to the owner's quota.
    pub reclaim_on_delete: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: SharedDatabase, reclaim_on_delete: bool) -> Self {
        Self {
            db,
            reclaim_on_delete,
        }
    }
}
