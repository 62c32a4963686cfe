//! File handlers for the Web API.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use std::sync::Arc;
use utoipa;

use crate::catalog::{FileCatalog, UploadParams};
use crate::web::dto::{
    FileResponse, MessageResponse, ResolveQuery, SetExpiryRequest, ShareResponse, UploadRequest,
    UploadResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::StowageError;

/// POST /api/upload - Record an uploaded file against a code's quota.
///
/// The blob bytes are already in the external store; the request carries
/// the URL the store returned. An invalid code reports 403 here (unlike
/// the storage lookup's 404): the code acts as the upload credential.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "File recorded", body = UploadResponse),
        (status = 403, description = "Invalid code or storage limit exceeded"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    let catalog = FileCatalog::new(state.db.pool(), state.reclaim_on_delete);
    let params = UploadParams {
        code: req.code,
        name: req.file_name,
        url: req.file_url,
        size: req.file_size,
        password: req.password,
        expiry_days: req.expiry_days,
    };

    let record = catalog.upload(&params).await.map_err(|e| match e {
        StowageError::InvalidCode => ApiError::forbidden("Invalid code"),
        other => ApiError::from(other),
    })?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_id: record.id,
    }))
}

/// GET /api/files/:code - List all files owned by a code.
#[utoipa::path(
    get,
    path = "/files/{code}",
    tag = "files",
    params(
        ("code" = String, Path, description = "Invite code")
    ),
    responses(
        (status = 200, description = "Files owned by the code", body = Vec<FileResponse>)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let catalog = FileCatalog::new(state.db.pool(), state.reclaim_on_delete);
    let files = catalog.list_by_owner(&code).await.map_err(|e| {
        tracing::error!("Failed to list files: {}", e);
        ApiError::internal("Failed to list files")
    })?;

    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// GET /api/download/:file_id - Redirect to the file's external URL.
#[utoipa::path(
    get,
    path = "/download/{file_id}",
    tag = "files",
    params(
        ("file_id" = String, Path, description = "File id"),
        ResolveQuery
    ),
    responses(
        (status = 303, description = "Redirect to the blob URL"),
        (status = 403, description = "Password required or wrong"),
        (status = 404, description = "File not found")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    Query(query): Query<ResolveQuery>,
) -> Result<Redirect, ApiError> {
    let catalog = FileCatalog::new(state.db.pool(), state.reclaim_on_delete);
    let url = catalog
        .resolve(&file_id, query.password.as_deref())
        .await?;

    Ok(Redirect::to(&url))
}

/// GET /api/share/:file_id - The file's external URL as JSON.
///
/// Same capability as download, different presentation.
#[utoipa::path(
    get,
    path = "/share/{file_id}",
    tag = "files",
    params(
        ("file_id" = String, Path, description = "File id"),
        ResolveQuery
    ),
    responses(
        (status = 200, description = "Share link", body = ShareResponse),
        (status = 403, description = "Password required or wrong"),
        (status = 404, description = "File not found")
    )
)]
pub async fn share_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ShareResponse>, ApiError> {
    let catalog = FileCatalog::new(state.db.pool(), state.reclaim_on_delete);
    let url = catalog
        .resolve(&file_id, query.password.as_deref())
        .await?;

    Ok(Json(ShareResponse { share_link: url }))
}

/// POST /api/set-expiry - Overwrite a file's expiry.
#[utoipa::path(
    post,
    path = "/set-expiry",
    tag = "files",
    request_body = SetExpiryRequest,
    responses(
        (status = 200, description = "Expiry set", body = MessageResponse),
        (status = 404, description = "File not found"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn set_expiry(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SetExpiryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let catalog = FileCatalog::new(state.db.pool(), state.reclaim_on_delete);
    catalog.set_expiry(&req.file_id, req.days).await?;

    Ok(Json(MessageResponse {
        message: format!("File will expire in {} days", req.days),
    }))
}

/// DELETE /api/delete/:file_id - Delete a file record.
///
/// Idempotent: deleting a non-existent id still reports success.
#[utoipa::path(
    delete,
    path = "/delete/{file_id}",
    tag = "files",
    params(
        ("file_id" = String, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let catalog = FileCatalog::new(state.db.pool(), state.reclaim_on_delete);
    catalog.delete(&file_id).await?;

    Ok(Json(MessageResponse {
        message: "File deleted".to_string(),
    }))
}
