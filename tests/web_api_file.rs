//! Web API file endpoint tests.
//!
//! Integration tests for upload, listing, download, share, expiry, and
//! deletion.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use stowage::catalog::FileCatalog;
use stowage::registry::CodeRepository;

use common::{create_test_server, create_test_server_with_reclaim, seed_active_code};

/// Upload a file and return the response body.
async fn upload(
    server: &axum_test::TestServer,
    code: &str,
    name: &str,
    size: i64,
) -> axum_test::TestResponse {
    server
        .post("/api/upload")
        .json(&json!({
            "code": code,
            "fileSize": size,
            "fileName": name,
            "fileUrl": format!("https://blobs.example/{name}")
        }))
        .await
}

#[tokio::test]
async fn test_upload_success() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let response = upload(&server, "ABC", "report.pdf", 600).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["message"], "File uploaded successfully");
    assert!(!body["fileId"].as_str().unwrap().is_empty());

    // The ledger moved
    let code = CodeRepository::new(db.pool())
        .get_active("ABC")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(code.used, 600);
}

#[tokio::test]
async fn test_upload_invalid_code_forbidden() {
    let (server, _db) = create_test_server().await;

    let response = upload(&server, "NOPE", "report.pdf", 100).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"], "Invalid code");
}

#[tokio::test]
async fn test_upload_quota_exceeded() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    upload(&server, "ABC", "a.bin", 600).await.assert_status_ok();

    let response = upload(&server, "ABC", "b.bin", 500).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"], "Storage limit exceeded");

    // used unchanged, no second file recorded
    let code = CodeRepository::new(db.pool())
        .get_active("ABC")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(code.used, 600);

    let files = server.get("/api/files/ABC").await.json::<Vec<Value>>();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["size"], 600);
}

#[tokio::test]
async fn test_upload_negative_size_rejected() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let response = upload(&server, "ABC", "weird.bin", -5).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_bad_url_rejected() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let response = server
        .post("/api/upload")
        .json(&json!({
            "code": "ABC",
            "fileSize": 10,
            "fileName": "f.bin",
            "fileUrl": "not a url"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_files_by_owner() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;
    seed_active_code(&db, "OTHER", 1000).await;

    upload(&server, "ABC", "a.bin", 100).await.assert_status_ok();
    upload(&server, "ABC", "b.bin", 200).await.assert_status_ok();
    upload(&server, "OTHER", "c.bin", 300).await.assert_status_ok();

    let files = server.get("/api/files/ABC").await.json::<Vec<Value>>();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f["uploadedBy"] == "ABC"));

    // Unknown owner lists empty, not an error
    let files = server.get("/api/files/NOBODY").await.json::<Vec<Value>>();
    assert!(files.is_empty());
}

#[tokio::test]
async fn test_download_redirects_to_blob_url() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let body = upload(&server, "ABC", "report.pdf", 100).await.json::<Value>();
    let file_id = body["fileId"].as_str().unwrap().to_string();

    let response = server.get(&format!("/api/download/{file_id}")).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "https://blobs.example/report.pdf"
    );
}

#[tokio::test]
async fn test_download_missing_file() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/api/download/no-such-id").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "file not found");
}

#[tokio::test]
async fn test_share_returns_link() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let body = upload(&server, "ABC", "report.pdf", 100).await.json::<Value>();
    let file_id = body["fileId"].as_str().unwrap().to_string();

    let response = server.get(&format!("/api/share/{file_id}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["shareLink"],
        "https://blobs.example/report.pdf"
    );
}

#[tokio::test]
async fn test_password_gated_download_and_share() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let response = server
        .post("/api/upload")
        .json(&json!({
            "code": "ABC",
            "fileSize": 100,
            "fileName": "secret.bin",
            "fileUrl": "https://blobs.example/secret.bin",
            "password": "hunter2"
        }))
        .await;
    response.assert_status_ok();
    let file_id = response.json::<Value>()["fileId"].as_str().unwrap().to_string();

    // The listing reveals the gate but not the password
    let files = server.get("/api/files/ABC").await.json::<Vec<Value>>();
    assert_eq!(files[0]["hasPassword"], true);
    assert!(files[0].get("password").is_none());

    // No password
    let response = server.get(&format!("/api/download/{file_id}")).await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Wrong password
    let response = server
        .get(&format!("/api/share/{file_id}"))
        .add_query_param("password", "wrong")
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Matching password
    let response = server
        .get(&format!("/api/download/{file_id}"))
        .add_query_param("password", "hunter2")
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let response = server
        .get(&format!("/api/share/{file_id}"))
        .add_query_param("password", "hunter2")
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["shareLink"],
        "https://blobs.example/secret.bin"
    );
}

#[tokio::test]
async fn test_set_expiry_and_sweep() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let body = upload(&server, "ABC", "brief.bin", 100).await.json::<Value>();
    let file_id = body["fileId"].as_str().unwrap().to_string();

    let response = server
        .post("/api/set-expiry")
        .json(&json!({ "fileId": file_id, "days": -1 }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "File will expire in -1 days"
    );

    // The sweep collects the past expiry
    let catalog = FileCatalog::new(db.pool(), false);
    assert_eq!(catalog.sweep_expired().await.unwrap(), 1);

    let files = server.get("/api/files/ABC").await.json::<Vec<Value>>();
    assert!(files.is_empty());
}

#[tokio::test]
async fn test_set_expiry_missing_file() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/set-expiry")
        .json(&json!({ "fileId": "no-such-id", "days": 7 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file_idempotent() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let body = upload(&server, "ABC", "gone.bin", 100).await.json::<Value>();
    let file_id = body["fileId"].as_str().unwrap().to_string();

    let response = server.delete(&format!("/api/delete/{file_id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "File deleted");

    // The listing never includes the deleted id
    let files = server.get("/api/files/ABC").await.json::<Vec<Value>>();
    assert!(files.iter().all(|f| f["id"] != file_id.as_str()));

    // Deleting again (or an id that never existed) still reports success
    let response = server.delete(&format!("/api/delete/{file_id}")).await;
    response.assert_status_ok();
    let response = server.delete("/api/delete/never-existed").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_delete_does_not_reclaim_quota_by_default() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    let body = upload(&server, "ABC", "big.bin", 600).await.json::<Value>();
    let file_id = body["fileId"].as_str().unwrap().to_string();

    server
        .delete(&format!("/api/delete/{file_id}"))
        .await
        .assert_status_ok();

    let storage = server.get("/api/storage/ABC").await.json::<Value>();
    assert_eq!(storage["used"], 600);
}

#[tokio::test]
async fn test_delete_reclaims_quota_when_enabled() {
    let (server, db) = create_test_server_with_reclaim(true).await;
    seed_active_code(&db, "ABC", 1000).await;

    let body = upload(&server, "ABC", "big.bin", 600).await.json::<Value>();
    let file_id = body["fileId"].as_str().unwrap().to_string();

    server
        .delete(&format!("/api/delete/{file_id}"))
        .await
        .assert_status_ok();

    let storage = server.get("/api/storage/ABC").await.json::<Value>();
    assert_eq!(storage["used"], 0);
}

#[tokio::test]
async fn test_quota_end_to_end() {
    let (server, db) = create_test_server().await;
    seed_active_code(&db, "ABC", 1000).await;

    // reserve 600 -> ok, used = 600
    upload(&server, "ABC", "first.bin", 600).await.assert_status_ok();
    let storage = server.get("/api/storage/ABC").await.json::<Value>();
    assert_eq!(storage["used"], 600);

    // reserve 500 -> quota exceeded (600 + 500 > 1000), used unchanged
    upload(&server, "ABC", "second.bin", 500)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    let storage = server.get("/api/storage/ABC").await.json::<Value>();
    assert_eq!(storage["used"], 600);

    // exactly one file of size 600 recorded
    let files = server.get("/api/files/ABC").await.json::<Vec<Value>>();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["size"], 600);
}
