//! Repository for file catalog operations.

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::file::{FileRecord, NewFileRecord};
use crate::{Result, StowageError};

/// Repository for the files table.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a file record with a generated id.
    pub async fn create(&self, new_file: &NewFileRecord) -> Result<FileRecord> {
        let id = Uuid::new_v4().to_string();
        let mut conn = self.pool.acquire().await?;
        Self::insert_on(&mut conn, &id, new_file).await?;
        // Return the connection before reading back through the pool
        drop(conn);

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| StowageError::NotFound("file".into()))
    }

    /// Insert a record under a caller-chosen id on an explicit connection,
    /// for the transactional upload path.
    pub(crate) async fn insert_on(
        conn: &mut SqliteConnection,
        id: &str,
        new_file: &NewFileRecord,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO files (id, name, url, size, uploaded_by, expiry, password)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(&new_file.name)
        .bind(&new_file.url)
        .bind(new_file.size)
        .bind(&new_file.uploaded_by)
        .bind(&new_file.expiry)
        .bind(&new_file.password)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Get a file record by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<FileRecord>> {
        let record = sqlx::query_as::<_, FileRecord>(
            "SELECT id, name, url, size, uploaded_by, expiry, password, created_at
             FROM files WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// List all files owned by a code. No pagination; order unspecified.
    pub async fn list_by_owner(&self, code: &str) -> Result<Vec<FileRecord>> {
        let records = sqlx::query_as::<_, FileRecord>(
            "SELECT id, name, url, size, uploaded_by, expiry, password, created_at
             FROM files WHERE uploaded_by = $1",
        )
        .bind(code)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Overwrite a record's expiry. Returns whether the record exists.
    pub async fn set_expiry(&self, id: &str, expiry: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE files SET expiry = $1 WHERE id = $2")
            .bind(expiry)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a file record. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Bulk-delete every record whose expiry has passed.
    pub async fn delete_expired(&self) -> Result<u64> {
        let mut conn = self.pool.acquire().await?;
        Self::delete_expired_on(&mut conn).await
    }

    /// Bulk-delete expired records on an explicit connection.
    pub(crate) async fn delete_expired_on(conn: &mut SqliteConnection) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM files WHERE expiry IS NOT NULL AND expiry < datetime('now')")
                .execute(conn)
                .await?;

        Ok(result.rows_affected())
    }

    /// Sum expired bytes per owner, for the reclaiming sweep.
    pub(crate) async fn sum_expired_by_owner_on(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<(String, i64)>> {
        let totals: Vec<(String, i64)> = sqlx::query_as(
            "SELECT uploaded_by, COALESCE(SUM(size), 0)
             FROM files
             WHERE expiry IS NOT NULL AND expiry < datetime('now')
             GROUP BY uploaded_by",
        )
        .fetch_all(conn)
        .await?;

        Ok(totals)
    }
}
