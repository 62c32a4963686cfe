//! Background expiry sweep for the file catalog.

use std::sync::Arc;

use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use super::service::FileCatalog;
use crate::db::Database;

/// Default sweep interval in seconds (1 hour).
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Periodic expiry sweeper.
///
/// Runs a fixed-interval timer and bulk-deletes file records whose expiry
/// has passed. A failed tick is logged and retried at the next interval;
/// the task itself never exits.
pub struct ExpirySweeper {
    db: Arc<Database>,
    sweep_interval: Duration,
    reclaim_on_delete: bool,
}

impl ExpirySweeper {
    /// Create a new sweeper with the default interval.
    pub fn new(db: Arc<Database>, reclaim_on_delete: bool) -> Self {
        Self {
            db,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            reclaim_on_delete,
        }
    }

    /// Create a new sweeper with a custom interval.
    pub fn with_interval(db: Arc<Database>, interval_secs: u64, reclaim_on_delete: bool) -> Self {
        Self {
            db,
            sweep_interval: Duration::from_secs(interval_secs),
            reclaim_on_delete,
        }
    }

    /// Run the sweep loop.
    ///
    /// This method runs indefinitely, sweeping at the configured interval.
    pub async fn run(&self) {
        info!(
            "Expiry sweeper started (interval: {} seconds)",
            self.sweep_interval.as_secs()
        );

        let mut timer = interval(self.sweep_interval);

        // Skip the first immediate tick
        timer.tick().await;

        loop {
            timer.tick().await;
            self.sweep_once().await;
        }
    }

    /// Execute a single sweep pass.
    async fn sweep_once(&self) {
        let catalog = FileCatalog::new(self.db.pool(), self.reclaim_on_delete);

        match catalog.sweep_expired().await {
            Ok(0) => debug!("No expired files to sweep"),
            Ok(count) => info!(deleted_count = count, "Swept expired files"),
            Err(e) => warn!(error = %e, "Expiry sweep failed; will retry next interval"),
        }
    }
}

/// Start the expiry sweeper as a background task.
pub fn start_expiry_sweeper(db: Arc<Database>, interval_secs: u64, reclaim_on_delete: bool) {
    let sweeper = ExpirySweeper::with_interval(db, interval_secs, reclaim_on_delete);
    tokio::spawn(async move {
        sweeper.run().await;
    });
}
