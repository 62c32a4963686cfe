//! Database schema and migrations for Stowage.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Invite code registry - three disjoint lifecycle states
    r#"
-- Unissued codes, created by provisioning. Nothing promotes these;
-- activation is an external step.
CREATE TABLE inactive_codes (
    code           TEXT PRIMARY KEY,
    storage_limit  INTEGER NOT NULL
);

-- Codes in use. `used` is the quota ledger: bytes consumed so far.
-- `expires` is optional per record; expired codes are deleted lazily
-- on lookup.
CREATE TABLE active_codes (
    code           TEXT PRIMARY KEY,
    storage_limit  INTEGER NOT NULL,
    used           INTEGER NOT NULL DEFAULT 0,
    activated_at   TEXT NOT NULL DEFAULT (datetime('now')),
    expires        TEXT
);

-- Time-limited codes, created by provisioning. `expires` is required.
CREATE TABLE temp_codes (
    code           TEXT PRIMARY KEY,
    storage_limit  INTEGER NOT NULL,
    expires        TEXT NOT NULL
);
"#,
    // v2: File catalog - metadata only, blob bytes live in an external store
    r#"
-- uploaded_by is deliberately not a foreign key: deleting a code does
-- not cascade to its files, and files outlive their code.
CREATE TABLE files (
    id           TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    url          TEXT NOT NULL,
    size         INTEGER NOT NULL,
    uploaded_by  TEXT NOT NULL,
    expiry       TEXT,
    password     TEXT,
    created_at   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_files_uploaded_by ON files(uploaded_by);
CREATE INDEX idx_files_expiry ON files(expiry);
"#,
];
