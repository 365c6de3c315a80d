//! SQL schema for the ta'aruf SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    email         TEXT PRIMARY KEY,
    employee_id   TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    gender        TEXT NOT NULL,              -- 'male' | 'female'
    approval      TEXT NOT NULL DEFAULT 'pending',
    photo         TEXT,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL               -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS biodata (
    email          TEXT PRIMARY KEY REFERENCES users(email),
    birth_place    TEXT,
    birth_date     TEXT,                      -- ISO 8601 calendar date
    blood_type     TEXT,
    marital_status TEXT,
    occupation     TEXT,
    ethnicity      TEXT,
    education      TEXT,
    hobbies        TEXT,
    motto          TEXT,
    phone          TEXT,
    address        TEXT,
    height_cm      INTEGER,
    weight_kg      INTEGER
);

CREATE TABLE IF NOT EXISTS partner_criteria (
    email          TEXT PRIMARY KEY REFERENCES users(email),
    age_min        INTEGER,
    age_max        INTEGER,
    marital_status TEXT,
    education      TEXT,
    other          TEXT
);

-- One row per unordered pair, ever. pair_lo/pair_hi are the lexicographic
-- min/max of the two participant emails; the UNIQUE constraint is what
-- collapses racing creations from either direction into a single record.
CREATE TABLE IF NOT EXISTS progress (
    progress_id      TEXT PRIMARY KEY,
    initiator_email  TEXT NOT NULL REFERENCES users(email),
    target_email     TEXT NOT NULL REFERENCES users(email),
    pair_lo          TEXT NOT NULL,
    pair_hi          TEXT NOT NULL,
    initiator_status TEXT NOT NULL DEFAULT 'pending',  -- 'pending' | 'like' | 'dislike'
    target_status    TEXT NOT NULL DEFAULT 'pending',
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL,
    UNIQUE (pair_lo, pair_hi)
);

CREATE INDEX IF NOT EXISTS progress_initiator_idx ON progress(initiator_email);
CREATE INDEX IF NOT EXISTS progress_target_idx    ON progress(target_email);

-- Chat messages are strictly append-only.
CREATE TABLE IF NOT EXISTS chat_messages (
    message_id   TEXT PRIMARY KEY,
    progress_id  TEXT NOT NULL REFERENCES progress(progress_id),
    sender_email TEXT NOT NULL REFERENCES users(email),
    body         TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS chat_progress_idx ON chat_messages(progress_id, created_at);

-- Bearer tokens, digest form only.
CREATE TABLE IF NOT EXISTS auth_tokens (
    token_hash TEXT PRIMARY KEY,
    email      TEXT NOT NULL REFERENCES users(email),
    created_at TEXT NOT NULL
);

PRAGMA user_version = 1;
";
