//! SQL schema for the Depot SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per logical file. Rows are immutable once inserted; re-saves of
-- the same (storage_path, filename) key resolve to the existing row.
CREATE TABLE IF NOT EXISTS artifacts (
    record_id    TEXT PRIMARY KEY,
    owner_id     TEXT NOT NULL,
    storage_path TEXT NOT NULL,
    filename     TEXT NOT NULL,
    created_at   TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    created_by   TEXT NOT NULL,
    UNIQUE (storage_path, filename)
);

-- The audit trail is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS events (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion-order tiebreak
    event_id   TEXT NOT NULL UNIQUE,
    event_type TEXT NOT NULL,   -- 'file_created' | 'file_updated'
    event_ref  TEXT NOT NULL,   -- '/files/{owner_id}/{record_id}'
    created_at TEXT NOT NULL,
    created_by TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS artifacts_owner_idx    ON artifacts(owner_id);
CREATE INDEX IF NOT EXISTS artifacts_filename_idx ON artifacts(owner_id, filename);
CREATE INDEX IF NOT EXISTS events_owner_idx       ON events(created_by, seq);

PRAGMA user_version = 1;
";
