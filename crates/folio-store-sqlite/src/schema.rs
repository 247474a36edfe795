//! SQL schema for the Folio SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per config key. Rows are upserted, never deleted.
CREATE TABLE IF NOT EXISTS site_config (
    key         TEXT PRIMARY KEY CHECK (length(key) > 0),
    value       TEXT NOT NULL,   -- JSON-encoded value; older rows may hold bare text
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS site_config_updated_idx ON site_config(updated_at);

PRAGMA user_version = 1;
";
