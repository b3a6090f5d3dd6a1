//! v002: warmth_mode_changes, warmth_boosts: append-only journals.
//!
//! `(contact_id, revision)` is unique per journal; each anchor revision is
//! produced by exactly one journal row.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS warmth_mode_changes (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id    TEXT NOT NULL REFERENCES contact_warmth(contact_id) ON DELETE CASCADE,
    from_mode     TEXT NOT NULL,
    to_mode       TEXT NOT NULL,
    score_before  REAL NOT NULL,
    score_after   REAL NOT NULL,
    created_at    TEXT NOT NULL,
    revision      INTEGER NOT NULL,
    UNIQUE (contact_id, revision)
);

CREATE INDEX IF NOT EXISTS idx_mode_changes_contact
    ON warmth_mode_changes(contact_id, revision);

CREATE TABLE IF NOT EXISTS warmth_boosts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id    TEXT NOT NULL REFERENCES contact_warmth(contact_id) ON DELETE CASCADE,
    channel       TEXT NOT NULL,
    direction     TEXT NOT NULL,
    occurred_at   TEXT NOT NULL,
    score_before  REAL NOT NULL,
    score_after   REAL NOT NULL,
    revision      INTEGER NOT NULL,
    created_at    TEXT NOT NULL,
    UNIQUE (contact_id, revision)
);

CREATE INDEX IF NOT EXISTS idx_boosts_contact
    ON warmth_boosts(contact_id, revision);
";
