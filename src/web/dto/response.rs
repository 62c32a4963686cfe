//! Response DTOs for the Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::FileRecord;
use crate::datetime::to_rfc3339;
use crate::registry::ActiveCode;

/// Storage info for an active code.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageResponse {
    /// The code string.
    pub code: String,
    /// Storage quota in bytes.
    pub storage_limit: i64,
    /// Bytes consumed so far.
    pub used: i64,
    /// Activation timestamp (RFC3339).
    pub activated_at: String,
    /// Optional expiry timestamp (RFC3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

impl From<ActiveCode> for StorageResponse {
    fn from(code: ActiveCode) -> Self {
        Self {
            storage_limit: code.storage_limit,
            used: code.used,
            activated_at: to_rfc3339(&code.activated_at),
            expires: code.expires.as_deref().map(to_rfc3339),
            code: code.code,
        }
    }
}

/// A file record in responses.
///
/// The password hash is never serialized; clients only learn whether a
/// password gates the file.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// External blob URL.
    pub url: String,
    /// File size in bytes.
    pub size: i64,
    /// Owner code.
    pub uploaded_by: String,
    /// Optional expiry timestamp (RFC3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    /// Whether download/share require a password.
    pub has_password: bool,
    /// Creation timestamp (RFC3339).
    pub created_at: String,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            has_password: record.has_password(),
            expiry: record.expiry.as_deref().map(to_rfc3339),
            created_at: to_rfc3339(&record.created_at),
            id: record.id,
            name: record.name,
            url: record.url,
            size: record.size,
            uploaded_by: record.uploaded_by,
        }
    }
}

/// Upload confirmation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Confirmation message.
    pub message: String,
    /// Id assigned to the new file.
    pub file_id: String,
}

/// Share link for a file.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// The file's external URL.
    pub share_link: String,
}

/// Generic confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Confirmation message.
    pub message: String,
}
