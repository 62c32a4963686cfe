//! Router configuration for the Web API.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{
    FileResponse, MessageResponse, SetExpiryRequest, ShareResponse, StorageResponse,
    UploadRequest, UploadResponse,
};
use super::handlers::{
    delete_file, download_file, get_storage, list_files, set_expiry, share_file, upload_file,
    AppState,
};
use super::middleware::create_cors_layer;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::storage::get_storage,
        super::handlers::file::upload_file,
        super::handlers::file::list_files,
        super::handlers::file::download_file,
        super::handlers::file::share_file,
        super::handlers::file::set_expiry,
        super::handlers::file::delete_file,
    ),
    components(schemas(
        StorageResponse,
        UploadRequest,
        UploadResponse,
        FileResponse,
        ShareResponse,
        SetExpiryRequest,
        MessageResponse,
    )),
    tags(
        (name = "storage", description = "Invite code storage info"),
        (name = "files", description = "File catalog operations")
    )
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/storage/:code", get(get_storage))
        .route("/upload", post(upload_file))
        .route("/files/:code", get(list_files))
        .route("/download/:file_id", get(download_file))
        .route("/share/:file_id", get(share_file))
        .route("/set-expiry", post(set_expiry))
        .route("/delete/:file_id", delete(delete_file));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the swagger-ui router.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
