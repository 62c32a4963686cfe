//! File catalog entities.

/// A file metadata record.
///
/// The blob bytes live in an external store; this record only carries the
/// store's URL alongside the metadata the service owns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecord {
    /// System-generated identifier (UUID v4).
    pub id: String,
    /// Display name.
    pub name: String,
    /// External blob location.
    pub url: String,
    /// File size in bytes.
    pub size: i64,
    /// Owner code. Valid at upload time; not re-validated after.
    pub uploaded_by: String,
    /// Optional expiry timestamp; the sweep collects records past it.
    pub expiry: Option<String>,
    /// Optional Argon2id password hash gating download/share.
    pub password: Option<String>,
    /// When the record was created.
    pub created_at: String,
}

impl FileRecord {
    /// Whether the record is gated by a password.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// Display name.
    pub name: String,
    /// External blob location.
    pub url: String,
    /// File size in bytes.
    pub size: i64,
    /// Owner code.
    pub uploaded_by: String,
    /// Optional expiry timestamp.
    pub expiry: Option<String>,
    /// Optional Argon2id password hash (hashed by the caller).
    pub password: Option<String>,
}

impl NewFileRecord {
    /// Create a new NewFileRecord.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        size: i64,
        uploaded_by: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            size,
            uploaded_by: uploaded_by.into(),
            expiry: None,
            password: None,
        }
    }

    /// Set the expiry timestamp.
    pub fn with_expiry(mut self, expiry: impl Into<String>) -> Self {
        self.expiry = Some(expiry.into());
        self
    }

    /// Set the password hash.
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password = Some(hash.into());
        self
    }
}
