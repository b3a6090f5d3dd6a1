//! v001: contact_warmth, the per-contact anchor row.
//!
//! `warmth_band`, `warmth_score_cached` and `warmth_cached_at` are display
//! caches and are never read back for scoring.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS contact_warmth (
    contact_id           TEXT PRIMARY KEY,
    warmth_mode          TEXT NOT NULL
                         CHECK (warmth_mode IN ('slow', 'medium', 'fast', 'test')),
    warmth_anchor_score  REAL NOT NULL
                         CHECK (warmth_anchor_score >= 0 AND warmth_anchor_score <= 100),
    warmth_anchor_at     TEXT NOT NULL,
    revision             INTEGER NOT NULL DEFAULT 0,
    origin_score         REAL NOT NULL,
    origin_at            TEXT NOT NULL,
    origin_mode          TEXT NOT NULL,
    warmth_band          TEXT,
    warmth_score_cached  INTEGER,
    warmth_cached_at     TEXT,
    created_at           TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at           TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_contact_warmth_band ON contact_warmth(warmth_band);
";
