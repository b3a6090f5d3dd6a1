//! Append and read the `warmth_mode_changes` and `warmth_boosts` journals.

use rusqlite::{params, Connection};

use warmth_core::errors::WarmthResult;
use warmth_core::models::{BoostLogEntry, ModeChangeLogEntry};

use super::{fmt_ts, parse_enum, parse_revision, parse_ts};
use crate::to_storage_err;

pub fn insert_mode_change(conn: &Connection, entry: &ModeChangeLogEntry) -> WarmthResult<()> {
    conn.execute(
        "INSERT INTO warmth_mode_changes
            (contact_id, from_mode, to_mode, score_before, score_after, created_at, revision)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.contact_id,
            entry.from_mode.as_str(),
            entry.to_mode.as_str(),
            entry.score_before,
            entry.score_after,
            fmt_ts(entry.created_at),
            entry.revision as i64,
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_boost(conn: &Connection, entry: &BoostLogEntry) -> WarmthResult<()> {
    conn.execute(
        "INSERT INTO warmth_boosts
            (contact_id, channel, direction, occurred_at, score_before, score_after, revision, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.contact_id,
            entry.channel.as_str(),
            entry.direction.as_str(),
            fmt_ts(entry.occurred_at),
            entry.score_before,
            entry.score_after,
            entry.revision as i64,
            fmt_ts(entry.created_at),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Mode changes for a contact, oldest revision first.
pub fn mode_changes_for(conn: &Connection, contact_id: &str) -> WarmthResult<Vec<ModeChangeLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT from_mode, to_mode, score_before, score_after, created_at, revision
             FROM warmth_mode_changes WHERE contact_id = ?1 ORDER BY revision",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![contact_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })
        .map_err(to_storage_err)?;

    let mut entries = Vec::new();
    for row in rows {
        let (from_mode, to_mode, score_before, score_after, created_at, revision) =
            row.map_err(to_storage_err)?;
        entries.push(ModeChangeLogEntry {
            contact_id: contact_id.to_string(),
            from_mode: parse_enum(contact_id, "from_mode", &from_mode)?,
            to_mode: parse_enum(contact_id, "to_mode", &to_mode)?,
            score_before,
            score_after,
            created_at: parse_ts(contact_id, "created_at", &created_at)?,
            revision: parse_revision(contact_id, revision)?,
        });
    }
    Ok(entries)
}

/// Boosts for a contact, oldest revision first.
pub fn boosts_for(conn: &Connection, contact_id: &str) -> WarmthResult<Vec<BoostLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT channel, direction, occurred_at, score_before, score_after, revision, created_at
             FROM warmth_boosts WHERE contact_id = ?1 ORDER BY revision",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![contact_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(to_storage_err)?;

    let mut entries = Vec::new();
    for row in rows {
        let (channel, direction, occurred_at, score_before, score_after, revision, created_at) =
            row.map_err(to_storage_err)?;
        entries.push(BoostLogEntry {
            contact_id: contact_id.to_string(),
            channel: parse_enum(contact_id, "channel", &channel)?,
            direction: parse_enum(contact_id, "direction", &direction)?,
            occurred_at: parse_ts(contact_id, "occurred_at", &occurred_at)?,
            score_before,
            score_after,
            revision: parse_revision(contact_id, revision)?,
            created_at: parse_ts(contact_id, "created_at", &created_at)?,
        });
    }
    Ok(entries)
}
