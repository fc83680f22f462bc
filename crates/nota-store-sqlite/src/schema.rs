//! SQL schema for the Nota SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS categories (
    category_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    color       TEXT NOT NULL
);

-- Deleting a category un-categorises its notes.
CREATE TABLE IF NOT EXISTS notes (
    note_id     TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    content     TEXT,
    status      TEXT NOT NULL DEFAULT 'ACTIVE'
                CHECK (status IN ('ACTIVE', 'INACTIVE')),
    category_id TEXT REFERENCES categories(category_id) ON DELETE SET NULL,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, fixed width; server-assigned
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS notes_status_created_idx ON notes(status, created_at);
CREATE INDEX IF NOT EXISTS notes_category_idx       ON notes(category_id);

PRAGMA user_version = 1;
";
