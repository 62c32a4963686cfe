//! Invite code entities.
//!
//! Codes exist in three disjoint lifecycle states, each with its own
//! table: inactive (unissued), active (in use, quota-tracked), and
//! temporary (time-limited). Nothing in this service promotes a code
//! between states; provisioning writes each table directly.

/// An unissued invite code.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InactiveCode {
    /// The code string.
    pub code: String,
    /// Storage quota in bytes granted on activation.
    pub storage_limit: i64,
}

/// An invite code in use.
///
/// `used` is the quota ledger: bytes consumed by accepted uploads.
/// It never exceeds `storage_limit`; the reservation guard enforces
/// this before any write.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActiveCode {
    /// The code string.
    pub code: String,
    /// Storage quota in bytes.
    pub storage_limit: i64,
    /// Bytes consumed so far.
    pub used: i64,
    /// When the code was activated.
    pub activated_at: String,
    /// Optional expiry timestamp. Expired codes are deleted lazily on lookup.
    pub expires: Option<String>,
}

impl ActiveCode {
    /// Bytes still available under the quota.
    pub fn remaining(&self) -> i64 {
        self.storage_limit - self.used
    }
}

/// A time-limited invite code. `expires` is always set.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TempCode {
    /// The code string.
    pub code: String,
    /// Storage quota in bytes.
    pub storage_limit: i64,
    /// Expiry timestamp.
    pub expires: String,
}

/// Data for provisioning a new active code.
#[derive(Debug, Clone)]
pub struct NewActiveCode {
    /// The code string.
    pub code: String,
    /// Storage quota in bytes.
    pub storage_limit: i64,
    /// Optional expiry timestamp.
    pub expires: Option<String>,
}

impl NewActiveCode {
    /// Create a new NewActiveCode without expiry.
    pub fn new(code: impl Into<String>, storage_limit: i64) -> Self {
        Self {
            code: code.into(),
            storage_limit,
            expires: None,
        }
    }

    /// Set the expiry timestamp.
    pub fn with_expires(mut self, expires: impl Into<String>) -> Self {
        self.expires = Some(expires.into());
        self
    }
}
