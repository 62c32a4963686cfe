//! Code registry for Stowage.
//!
//! Tracks invite codes in three disjoint lifecycle states and, for active
//! codes, the quota ledger of bytes consumed against bytes allowed.

mod code;
mod repository;
mod service;

pub use code::{ActiveCode, InactiveCode, NewActiveCode, TempCode};
pub use repository::CodeRepository;
pub use service::CodeRegistry;
