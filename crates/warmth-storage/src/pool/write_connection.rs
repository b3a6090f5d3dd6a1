//! Single write connection behind a mutex. Serialized writes.
//!
//! The lock guards the connection only. It is held for the duration of one
//! closure (typically one short transaction), never across a read-compute
//! cycle; per-contact consistency comes from compare-and-swap.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use warmth_core::errors::{StorageError, WarmthResult};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> WarmthResult<Self> {
        let conn = Connection::open(path).map_err(to_storage_err)?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> WarmthResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_storage_err)?;
        apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    ///
    /// Blocking; async callers go through `spawn_blocking`.
    pub fn with_conn_sync<F, T>(&self, f: F) -> WarmthResult<T>
    where
        F: FnOnce(&Connection) -> WarmthResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| StorageError::LockPoisoned {
            message: format!("write connection: {e}"),
        })?;
        f(&guard)
    }
}
