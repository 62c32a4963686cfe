//! Request DTOs for the Web API.
//!
//! Wire field casing is camelCase, the interface the service's clients
//! speak.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Upload request. The blob has already been placed in the external
/// store; `fileUrl` is its location there.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Invite code authorizing the upload.
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: String,
    /// File size in bytes.
    #[validate(range(min = 0, message = "fileSize must not be negative"))]
    pub file_size: i64,
    /// Display name.
    #[validate(length(min = 1, message = "fileName must not be empty"))]
    pub file_name: String,
    /// External blob URL.
    #[validate(url(message = "fileUrl must be a valid URL"))]
    pub file_url: String,
    /// Optional password gating download/share.
    #[serde(default)]
    pub password: Option<String>,
    /// Optional expiry, in days from now.
    #[serde(default)]
    pub expiry_days: Option<i64>,
}

/// Set-expiry request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetExpiryRequest {
    /// File id.
    #[validate(length(min = 1, message = "fileId must not be empty"))]
    pub file_id: String,
    /// Days from now. Zero or negative values produce a past expiry that
    /// the next sweep collects.
    pub days: i64,
}

/// Query parameters for download/share of password-gated files.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolveQuery {
    /// Password for gated files.
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_request_camel_case() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"code":"ABC","fileSize":600,"fileName":"report.pdf","fileUrl":"https://blobs.example/abc"}"#,
        )
        .unwrap();
        assert_eq!(req.code, "ABC");
        assert_eq!(req.file_size, 600);
        assert_eq!(req.file_name, "report.pdf");
        assert!(req.password.is_none());
        assert!(req.expiry_days.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_upload_request_negative_size_invalid() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"code":"ABC","fileSize":-1,"fileName":"f","fileUrl":"https://blobs.example/abc"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_upload_request_bad_url_invalid() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"code":"ABC","fileSize":1,"fileName":"f","fileUrl":"not a url"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_set_expiry_request_allows_negative_days() {
        let req: SetExpiryRequest =
            serde_json::from_str(r#"{"fileId":"abc","days":-3}"#).unwrap();
        assert_eq!(req.days, -3);
        assert!(req.validate().is_ok());
    }
}
