//! Storage info handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use utoipa;

use crate::registry::CodeRegistry;
use crate::web::dto::StorageResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/storage/:code - Storage info for an active code.
///
/// An expired code is deleted during this lookup and reported as 404,
/// so it is unreachable after exactly one attempt.
#[utoipa::path(
    get,
    path = "/storage/{code}",
    tag = "storage",
    params(
        ("code" = String, Path, description = "Invite code")
    ),
    responses(
        (status = 200, description = "Storage info", body = StorageResponse),
        (status = 404, description = "Invalid or expired code")
    )
)]
pub async fn get_storage(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<StorageResponse>, ApiError> {
    let registry = CodeRegistry::new(state.db.pool());
    let record = registry.lookup_active(&code).await?;

    Ok(Json(StorageResponse::from(record)))
}
