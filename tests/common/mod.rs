//! Shared helpers for Web API integration tests.

use std::sync::Arc;

use axum_test::TestServer;
use stowage::registry::{CodeRepository, NewActiveCode};
use stowage::web::handlers::AppState;
use stowage::web::router::{create_health_router, create_router};
use stowage::Database;

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    create_test_server_with_reclaim(false).await
}

/// Create a test server with an explicit reclaim-on-delete setting.
pub async fn create_test_server_with_reclaim(
    reclaim_on_delete: bool,
) -> (TestServer, Arc<Database>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let shared_db = Arc::new(db);

    let app_state = Arc::new(AppState::new(shared_db.clone(), reclaim_on_delete));

    let router = create_router(app_state, &[]).merge(create_health_router());

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, shared_db)
}

/// Provision an active code directly in the database.
pub async fn seed_active_code(db: &Arc<Database>, code: &str, storage_limit: i64) {
    let repo = CodeRepository::new(db.pool());
    repo.create_active(&NewActiveCode::new(code, storage_limit))
        .await
        .expect("Failed to seed active code");
}

/// Provision an active code with an expiry timestamp.
pub async fn seed_active_code_with_expires(
    db: &Arc<Database>,
    code: &str,
    storage_limit: i64,
    expires: &str,
) {
    let repo = CodeRepository::new(db.pool());
    repo.create_active(&NewActiveCode::new(code, storage_limit).with_expires(expires))
        .await
        .expect("Failed to seed active code");
}
