//! Code registry service.

use sqlx::SqlitePool;
use tracing::info;

use super::code::ActiveCode;
use super::repository::CodeRepository;
use crate::{datetime, Result, StowageError};

/// Service over the code registry and its quota ledger.
pub struct CodeRegistry<'a> {
    repo: CodeRepository<'a>,
}

impl<'a> CodeRegistry<'a> {
    /// Create a new registry service.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: CodeRepository::new(pool),
        }
    }

    /// Look up an active code, deleting it if its expiry has passed.
    ///
    /// This is an explicit three-step contract: read the record; if it
    /// carries an expiry in the past, delete it and report
    /// [`StowageError::CodeExpired`]; otherwise return it. A code with a
    /// past expiry is therefore unreachable after exactly one lookup and
    /// absent from the registry thereafter.
    pub async fn lookup_active(&self, code: &str) -> Result<ActiveCode> {
        let record = self
            .repo
            .get_active(code)
            .await?
            .ok_or(StowageError::InvalidCode)?;

        if let Some(expires) = &record.expires {
            if datetime::is_past(expires) {
                self.repo.delete_active(code).await?;
                info!(code, "Deleted expired code on lookup");
                return Err(StowageError::CodeExpired);
            }
        }

        Ok(record)
    }

    /// Reserve `amount` bytes against the code's quota.
    ///
    /// Succeeds iff `used + amount <= storage_limit`; on success `used`
    /// becomes exactly `used + amount`. The check and increment are
    /// atomic, so concurrent reservations cannot both pass.
    pub async fn reserve(&self, code: &str, amount: i64) -> Result<()> {
        self.repo.reserve(code, amount).await
    }

    /// Return `amount` bytes to the code's ledger, floored at zero.
    pub async fn release(&self, code: &str, amount: i64) -> Result<()> {
        self.repo.release(code, amount).await
    }
}
