//! File catalog service.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::file::{FileRecord, NewFileRecord};
use super::password;
use super::repository::FileRepository;
use crate::registry::CodeRepository;
use crate::{datetime, Result, StowageError};

/// Parameters for an upload. The blob itself has already been placed in
/// the external store; `url` is its location there.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Owner code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// External blob location.
    pub url: String,
    /// File size in bytes.
    pub size: i64,
    /// Optional clear-text password gating download/share.
    pub password: Option<String>,
    /// Optional expiry, in days from now.
    pub expiry_days: Option<i64>,
}

/// Service over the file catalog, coordinating with the quota ledger.
pub struct FileCatalog<'a> {
    pool: &'a SqlitePool,
    reclaim_on_delete: bool,
}

impl<'a> FileCatalog<'a> {
    /// Create a new catalog service.
    pub fn new(pool: &'a SqlitePool, reclaim_on_delete: bool) -> Self {
        Self {
            pool,
            reclaim_on_delete,
        }
    }

    /// Record an uploaded file, reserving its size against the owner's
    /// quota.
    ///
    /// The ledger update and the catalog insert happen in one
    /// transaction: if either fails, neither is persisted, so the two
    /// can never diverge. Fails with [`StowageError::InvalidCode`] if the
    /// code is absent and [`StowageError::QuotaExceeded`] if the size
    /// does not fit the remaining quota.
    pub async fn upload(&self, params: &UploadParams) -> Result<FileRecord> {
        let password_hash = match &params.password {
            Some(pw) => Some(password::hash_password(pw)?),
            None => None,
        };

        let mut new_file = NewFileRecord::new(
            params.name.as_str(),
            params.url.as_str(),
            params.size,
            params.code.as_str(),
        );
        if let Some(days) = params.expiry_days {
            new_file = new_file.with_expiry(datetime::days_from_now(days));
        }
        if let Some(hash) = password_hash {
            new_file = new_file.with_password_hash(hash);
        }

        let id = Uuid::new_v4().to_string();

        let mut tx = self.pool.begin().await?;
        CodeRepository::reserve_on(&mut tx, &params.code, params.size).await?;
        FileRepository::insert_on(&mut tx, &id, &new_file).await?;
        tx.commit().await?;

        FileRepository::new(self.pool)
            .get_by_id(&id)
            .await?
            .ok_or_else(|| StowageError::NotFound("file".into()))
    }

    /// List all files owned by a code.
    pub async fn list_by_owner(&self, code: &str) -> Result<Vec<FileRecord>> {
        FileRepository::new(self.pool).list_by_owner(code).await
    }

    /// Resolve a file id to its external URL.
    ///
    /// This is the single capability behind both download and share; the
    /// redirect-vs-JSON difference lives at the HTTP boundary. If the
    /// record carries a password hash, a matching password must be
    /// supplied.
    pub async fn resolve(&self, id: &str, supplied_password: Option<&str>) -> Result<String> {
        let record = FileRepository::new(self.pool)
            .get_by_id(id)
            .await?
            .ok_or_else(|| StowageError::NotFound("file".into()))?;

        if let Some(hash) = &record.password {
            let supplied = supplied_password
                .ok_or_else(|| StowageError::Forbidden("password required".to_string()))?;
            password::verify_password(supplied, hash)?;
        }

        Ok(record.url)
    }

    /// Get a file record by id.
    pub async fn get(&self, id: &str) -> Result<Option<FileRecord>> {
        FileRepository::new(self.pool).get_by_id(id).await
    }

    /// Overwrite a file's expiry to `days` days from now.
    ///
    /// `days` is not floored: zero or negative values produce a past
    /// expiry that the next sweep collects. Fails with NotFound for a
    /// missing id.
    pub async fn set_expiry(&self, id: &str, days: i64) -> Result<()> {
        let expiry = datetime::days_from_now(days);
        let updated = FileRepository::new(self.pool).set_expiry(id, &expiry).await?;
        if !updated {
            return Err(StowageError::NotFound("file".into()));
        }
        Ok(())
    }

    /// Delete a file record. Idempotent: a missing id is still Ok.
    ///
    /// With reclaim-on-delete enabled, a removed record's bytes are
    /// returned to its owner's ledger; otherwise the ledger is untouched
    /// (one-way quota consumption).
    pub async fn delete(&self, id: &str) -> Result<()> {
        let repo = FileRepository::new(self.pool);

        if !self.reclaim_on_delete {
            repo.delete(id).await?;
            return Ok(());
        }

        let Some(record) = repo.get_by_id(id).await? else {
            return Ok(());
        };
        if repo.delete(id).await? {
            CodeRepository::new(self.pool)
                .release(&record.uploaded_by, record.size)
                .await?;
        }
        Ok(())
    }

    /// Delete every record whose expiry has passed. Returns the count.
    ///
    /// With reclaim-on-delete enabled the doomed bytes are first summed
    /// per owner and released; aggregation, release, and deletion share
    /// one transaction so an explicit delete racing the sweep cannot be
    /// released twice.
    pub async fn sweep_expired(&self) -> Result<u64> {
        if !self.reclaim_on_delete {
            return FileRepository::new(self.pool).delete_expired().await;
        }

        let mut tx = self.pool.begin().await?;
        let totals = FileRepository::sum_expired_by_owner_on(&mut tx).await?;
        for (owner, bytes) in &totals {
            CodeRepository::release_on(&mut tx, owner, *bytes).await?;
        }
        let deleted = FileRepository::delete_expired_on(&mut tx).await?;
        tx.commit().await?;

        Ok(deleted)
    }
}
