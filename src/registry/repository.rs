//! Repository for invite code and quota ledger operations.

use sqlx::{SqliteConnection, SqlitePool};

use super::code::{ActiveCode, InactiveCode, NewActiveCode, TempCode};
use crate::{Result, StowageError};

/// Repository for the code registry tables.
pub struct CodeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CodeRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Provision an unissued code.
    pub async fn create_inactive(&self, code: &str, storage_limit: i64) -> Result<InactiveCode> {
        sqlx::query("INSERT INTO inactive_codes (code, storage_limit) VALUES ($1, $2)")
            .bind(code)
            .bind(storage_limit)
            .execute(self.pool)
            .await?;

        self.get_inactive(code)
            .await?
            .ok_or_else(|| StowageError::NotFound("inactive code".into()))
    }

    /// Provision an active code.
    pub async fn create_active(&self, new_code: &NewActiveCode) -> Result<ActiveCode> {
        sqlx::query(
            "INSERT INTO active_codes (code, storage_limit, expires) VALUES ($1, $2, $3)",
        )
        .bind(&new_code.code)
        .bind(new_code.storage_limit)
        .bind(&new_code.expires)
        .execute(self.pool)
        .await?;

        self.get_active(&new_code.code)
            .await?
            .ok_or_else(|| StowageError::NotFound("active code".into()))
    }

    /// Provision a temporary code. `expires` is required.
    pub async fn create_temp(
        &self,
        code: &str,
        storage_limit: i64,
        expires: &str,
    ) -> Result<TempCode> {
        sqlx::query("INSERT INTO temp_codes (code, storage_limit, expires) VALUES ($1, $2, $3)")
            .bind(code)
            .bind(storage_limit)
            .bind(expires)
            .execute(self.pool)
            .await?;

        self.get_temp(code)
            .await?
            .ok_or_else(|| StowageError::NotFound("temp code".into()))
    }

    /// Get an unissued code by code string.
    pub async fn get_inactive(&self, code: &str) -> Result<Option<InactiveCode>> {
        let record = sqlx::query_as::<_, InactiveCode>(
            "SELECT code, storage_limit FROM inactive_codes WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Get an active code by code string. Pure read, no side effects.
    pub async fn get_active(&self, code: &str) -> Result<Option<ActiveCode>> {
        let record = sqlx::query_as::<_, ActiveCode>(
            "SELECT code, storage_limit, used, activated_at, expires
             FROM active_codes WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Get a temporary code by code string.
    ///
    /// No endpoint consults temporary codes; this exists for provisioning
    /// and inspection.
    pub async fn get_temp(&self, code: &str) -> Result<Option<TempCode>> {
        let record = sqlx::query_as::<_, TempCode>(
            "SELECT code, storage_limit, expires FROM temp_codes WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Delete an active code. Returns whether a row was removed.
    ///
    /// Files uploaded with the code are not touched: there is no cascade.
    pub async fn delete_active(&self, code: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM active_codes WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reserve `amount` bytes against the code's quota.
    ///
    /// The check and the increment are a single conditional UPDATE, so two
    /// concurrent reservations cannot both pass the quota check.
    pub async fn reserve(&self, code: &str, amount: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        Self::reserve_on(&mut conn, code, amount).await
    }

    /// Reserve on an explicit connection, for callers running inside a
    /// transaction that spans the ledger update and a file insert.
    pub(crate) async fn reserve_on(
        conn: &mut SqliteConnection,
        code: &str,
        amount: i64,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE active_codes
             SET used = used + $1
             WHERE code = $2 AND used + $1 <= storage_limit",
        )
        .bind(amount)
        .bind(code)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            // Zero rows means the guard failed or the code is absent;
            // distinguish the two.
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT 1 FROM active_codes WHERE code = $1")
                    .bind(code)
                    .fetch_optional(&mut *conn)
                    .await?;

            return Err(match exists {
                Some(_) => StowageError::QuotaExceeded,
                None => StowageError::InvalidCode,
            });
        }

        Ok(())
    }

    /// Return `amount` bytes to the code's ledger, floored at zero.
    ///
    /// Only invoked when reclaim-on-delete is enabled; with it off, quota
    /// consumption is one-way.
    pub async fn release(&self, code: &str, amount: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        Self::release_on(&mut conn, code, amount).await
    }

    /// Release on an explicit connection (transactional sweep path).
    pub(crate) async fn release_on(
        conn: &mut SqliteConnection,
        code: &str,
        amount: i64,
    ) -> Result<()> {
        sqlx::query("UPDATE active_codes SET used = MAX(used - $1, 0) WHERE code = $2")
            .bind(amount)
            .bind(code)
            .execute(conn)
            .await?;

        Ok(())
    }
}
