//! # warmth-storage
//!
//! SQLite persistence for warmth anchors. One serialized write connection,
//! a round-robin read pool, `PRAGMA user_version` migrations, and the
//! append-only mode-change and boost journals.

pub mod audit;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use warmth_core::errors::{StorageError, WarmthError};

/// Convert a rusqlite error into a `WarmthError::Storage`.
///
/// `SQLITE_BUSY` and `SQLITE_LOCKED` become [`StorageError::Busy`] so that
/// callers can tell "outcome unknown" apart from a definite failure.
pub(crate) fn to_storage_err(e: rusqlite::Error) -> WarmthError {
    let busy = matches!(
        e.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
    );
    if busy {
        StorageError::Busy {
            message: e.to_string(),
        }
        .into()
    } else {
        StorageError::SqliteError {
            message: e.to_string(),
        }
        .into()
    }
}
