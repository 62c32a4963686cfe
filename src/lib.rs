//! Stowage - invite-code-gated file storage service.
//!
//! Users authenticate with an opaque invite code instead of an account,
//! receive a byte quota, and upload, list, download, share, expire, and
//! delete files whose blobs live in an external store. This service holds
//! only metadata and the blob URL.

pub mod catalog;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod registry;
pub mod web;

pub use catalog::{
    ExpirySweeper, FileCatalog, FileRecord, FileRepository, NewFileRecord, UploadParams,
};
pub use config::Config;
pub use db::Database;
pub use error::{Result, StowageError};
pub use registry::{ActiveCode, CodeRegistry, CodeRepository, InactiveCode, NewActiveCode, TempCode};
pub use web::WebServer;
