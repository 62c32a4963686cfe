//! File catalog for Stowage.
//!
//! Metadata records for externally stored blobs, plus the background
//! expiry sweep. Uploads coordinate with the quota ledger in the
//! `registry` module.

mod file;
pub mod password;
mod repository;
mod service;
mod sweep;

pub use file::{FileRecord, NewFileRecord};
pub use repository::FileRepository;
pub use service::{FileCatalog, UploadParams};
pub use sweep::{start_expiry_sweeper, ExpirySweeper, DEFAULT_SWEEP_INTERVAL_SECS};
