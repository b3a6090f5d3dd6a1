//! Insert, read, compare-and-swap and delete for `contact_warmth`.

use rusqlite::{params, Connection, OptionalExtension, Row};

use warmth_core::errors::{WarmthError, WarmthResult};
use warmth_core::models::{Anchor, AnchorOrigin, AnchorRecord, DisplaySnapshot};

use super::{fmt_ts, parse_enum, parse_revision, parse_ts};
use crate::to_storage_err;

const SELECT_COLUMNS: &str = "
    contact_id, warmth_mode, warmth_anchor_score, warmth_anchor_at, revision,
    origin_score, origin_at, origin_mode,
    warmth_band, warmth_score_cached, warmth_cached_at";

/// Insert a new anchor row. The anchor doubles as the immutable origin.
pub fn insert_anchor(conn: &Connection, anchor: &Anchor, display: &DisplaySnapshot) -> WarmthResult<()> {
    let anchor_at = fmt_ts(anchor.anchor_at);
    let result = conn.execute(
        "INSERT INTO contact_warmth (
            contact_id, warmth_mode, warmth_anchor_score, warmth_anchor_at, revision,
            origin_score, origin_at, origin_mode,
            warmth_band, warmth_score_cached, warmth_cached_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?3, ?4, ?2, ?6, ?7, ?8)",
        params![
            anchor.contact_id,
            anchor.mode.as_str(),
            anchor.score,
            anchor_at,
            anchor.revision as i64,
            display.band.as_str(),
            display.score_cached,
            fmt_ts(display.cached_at),
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Err(WarmthError::AlreadyExists {
                contact_id: anchor.contact_id.clone(),
            })
        }
        Err(e) => Err(to_storage_err(e)),
    }
}

pub fn get_record(conn: &Connection, contact_id: &str) -> WarmthResult<Option<AnchorRecord>> {
    let raw = conn
        .query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM contact_warmth WHERE contact_id = ?1"),
            params![contact_id],
            RawAnchorRow::from_row,
        )
        .optional()
        .map_err(to_storage_err)?;
    raw.map(RawAnchorRow::into_record).transpose()
}

pub fn list_records(conn: &Connection) -> WarmthResult<Vec<AnchorRecord>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM contact_warmth ORDER BY contact_id"
        ))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], RawAnchorRow::from_row)
        .map_err(to_storage_err)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row.map_err(to_storage_err)?.into_record()?);
    }
    Ok(records)
}

/// Replace the anchor only if the row still holds `expected` exactly
/// (revision and triple). Returns whether a row was updated.
pub fn swap_anchor(
    conn: &Connection,
    expected: &Anchor,
    new: &Anchor,
    display: &DisplaySnapshot,
) -> WarmthResult<bool> {
    let changed = conn
        .execute(
            "UPDATE contact_warmth SET
                warmth_mode = ?1,
                warmth_anchor_score = ?2,
                warmth_anchor_at = ?3,
                revision = ?4,
                warmth_band = ?5,
                warmth_score_cached = ?6,
                warmth_cached_at = ?7,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE contact_id = ?8
               AND revision = ?9
               AND warmth_anchor_score = ?10
               AND warmth_anchor_at = ?11
               AND warmth_mode = ?12",
            params![
                new.mode.as_str(),
                new.score,
                fmt_ts(new.anchor_at),
                new.revision as i64,
                display.band.as_str(),
                display.score_cached,
                fmt_ts(display.cached_at),
                expected.contact_id,
                expected.revision as i64,
                expected.score,
                fmt_ts(expected.anchor_at),
                expected.mode.as_str(),
            ],
        )
        .map_err(to_storage_err)?;
    Ok(changed == 1)
}

pub fn delete_anchor(conn: &Connection, contact_id: &str) -> WarmthResult<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM contact_warmth WHERE contact_id = ?1",
            params![contact_id],
        )
        .map_err(to_storage_err)?;
    Ok(deleted > 0)
}

/// Column values as stored, before parsing into domain types.
struct RawAnchorRow {
    contact_id: String,
    mode: String,
    score: f64,
    anchor_at: String,
    revision: i64,
    origin_score: f64,
    origin_at: String,
    origin_mode: String,
    band: Option<String>,
    score_cached: Option<i64>,
    cached_at: Option<String>,
}

impl RawAnchorRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            contact_id: row.get(0)?,
            mode: row.get(1)?,
            score: row.get(2)?,
            anchor_at: row.get(3)?,
            revision: row.get(4)?,
            origin_score: row.get(5)?,
            origin_at: row.get(6)?,
            origin_mode: row.get(7)?,
            band: row.get(8)?,
            score_cached: row.get(9)?,
            cached_at: row.get(10)?,
        })
    }

    fn into_record(self) -> WarmthResult<AnchorRecord> {
        let id = self.contact_id.as_str();
        let anchor = Anchor {
            contact_id: self.contact_id.clone(),
            score: self.score,
            anchor_at: parse_ts(id, "warmth_anchor_at", &self.anchor_at)?,
            mode: parse_enum(id, "warmth_mode", &self.mode)?,
            revision: parse_revision(id, self.revision)?,
        };
        let origin = AnchorOrigin {
            score: self.origin_score,
            anchor_at: parse_ts(id, "origin_at", &self.origin_at)?,
            mode: parse_enum(id, "origin_mode", &self.origin_mode)?,
        };
        let display = match (self.band, self.score_cached, self.cached_at) {
            (Some(band), Some(score_cached), Some(cached_at)) => Some(DisplaySnapshot {
                band: parse_enum(id, "warmth_band", &band)?,
                score_cached,
                cached_at: parse_ts(id, "warmth_cached_at", &cached_at)?,
            }),
            _ => None,
        };
        Ok(AnchorRecord {
            anchor,
            origin,
            display,
        })
    }
}
