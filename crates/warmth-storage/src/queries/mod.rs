//! SQL for the anchor row and the audit journals.

pub mod anchor_ops;
pub mod audit_ops;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use warmth_core::errors::{StorageError, WarmthError};

/// Canonical on-disk timestamp: RFC 3339, UTC, millisecond precision.
/// Compare-and-swap matches on this exact text.
pub fn fmt_ts(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_ts(contact_id: &str, column: &str, raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(contact_id, format!("{column} {raw:?}: {e}")))
}

pub(crate) fn parse_enum<T>(contact_id: &str, column: &str, raw: &str) -> Result<T, StorageError>
where
    T: FromStr<Err = WarmthError>,
{
    raw.parse()
        .map_err(|e| corrupt(contact_id, format!("{column}: {e}")))
}

pub(crate) fn parse_revision(contact_id: &str, raw: i64) -> Result<u64, StorageError> {
    u64::try_from(raw).map_err(|_| corrupt(contact_id, format!("negative revision {raw}")))
}

fn corrupt(contact_id: &str, details: String) -> StorageError {
    StorageError::CorruptRow {
        contact_id: contact_id.to_string(),
        details,
    }
}
