//! StorageEngine: owns the ConnectionPool, runs migrations on open and
//! implements IAnchorStore.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;

use warmth_core::config::StorageConfig;
use warmth_core::errors::{WarmthError, WarmthResult};
use warmth_core::models::{
    Anchor, AnchorMutation, AnchorRecord, BoostLogEntry, DisplaySnapshot, ModeChangeLogEntry,
};
use warmth_core::traits::{CasOutcome, IAnchorStore};

use crate::audit::AuditLogger;
use crate::migrations;
use crate::pool::{ConnectionPool, ReadPool, WriteConnection};
use crate::queries::{anchor_ops, audit_ops};
use crate::to_storage_err;

/// Path value that selects an in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, with default pool
    /// size and busy timeout.
    pub fn open(path: &Path) -> WarmthResult<Self> {
        let defaults = StorageConfig::default();
        Self::open_with(path, defaults.read_pool_size, defaults.busy_timeout_ms)
    }

    /// Open whatever `config.db_path` names; `:memory:` selects an
    /// in-memory database.
    pub fn from_config(config: &StorageConfig) -> WarmthResult<Self> {
        if config.db_path == IN_MEMORY_PATH {
            return Self::open_in_memory();
        }
        Self::open_with(
            Path::new(&config.db_path),
            config.read_pool_size,
            config.busy_timeout_ms,
        )
    }

    fn open_with(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> WarmthResult<Self> {
        // Schema must exist before read-only connections attach.
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        writer.with_conn_sync(|conn| Ok(migrations::run_migrations(conn)?))?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;

        let pool = ConnectionPool {
            writer: Arc::new(writer),
            readers: Some(Arc::new(readers)),
            db_path: Some(path.to_path_buf()),
        };
        tracing::info!(path = %path.display(), read_pool_size, "opened warmth store");
        Ok(Self { pool })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> WarmthResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> WarmthResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| Ok(migrations::run_migrations(conn)?))
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> WarmthResult<T>
    where
        F: FnOnce(&Connection) -> WarmthResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    /// Run `f` inside a transaction on the writer; commit on `Ok`, roll back
    /// on `Err` or when `f` reports nothing should be kept.
    fn in_transaction<F, T>(&self, label: &str, f: F) -> WarmthResult<T>
    where
        F: FnOnce(&Connection) -> WarmthResult<(T, bool)>,
    {
        self.pool.writer.with_conn_sync(|conn| {
            let tx = conn.unchecked_transaction().map_err(to_storage_err)?;
            match f(&tx) {
                Ok((value, true)) => {
                    tx.commit().map_err(to_storage_err)?;
                    Ok(value)
                }
                Ok((value, false)) => {
                    tx.rollback().map_err(to_storage_err)?;
                    Ok(value)
                }
                Err(e) => {
                    tracing::debug!(label, error = %e, "rolling back");
                    if let Err(rollback) = tx.rollback() {
                        tracing::debug!(label, error = %rollback, "rollback failed; dropping transaction");
                    }
                    Err(e)
                }
            }
        })
    }
}

fn check_mutation(expected: &Anchor, new: &Anchor, mutation: &AnchorMutation) -> WarmthResult<()> {
    if new.contact_id != expected.contact_id || mutation.contact_id() != expected.contact_id {
        return Err(WarmthError::validation(
            "contact_id",
            "anchor swap must target a single contact",
        ));
    }
    if new.revision != expected.revision + 1 || mutation.revision() != new.revision {
        return Err(WarmthError::validation(
            "revision",
            format!(
                "expected successor revision {}, got anchor {} / journal {}",
                expected.revision + 1,
                new.revision,
                mutation.revision()
            ),
        ));
    }
    Ok(())
}

impl IAnchorStore for StorageEngine {
    fn create(&self, anchor: &Anchor, display: &DisplaySnapshot) -> WarmthResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| anchor_ops::insert_anchor(conn, anchor, display))
    }

    fn delete(&self, contact_id: &str) -> WarmthResult<bool> {
        self.in_transaction("delete", |conn| {
            conn.execute(
                "DELETE FROM warmth_mode_changes WHERE contact_id = ?1",
                [contact_id],
            )
            .map_err(to_storage_err)?;
            conn.execute("DELETE FROM warmth_boosts WHERE contact_id = ?1", [contact_id])
                .map_err(to_storage_err)?;
            let deleted = anchor_ops::delete_anchor(conn, contact_id)?;
            Ok((deleted, true))
        })
    }

    fn get(&self, contact_id: &str) -> WarmthResult<Option<Anchor>> {
        Ok(self.get_record(contact_id)?.map(|r| r.anchor))
    }

    fn get_record(&self, contact_id: &str) -> WarmthResult<Option<AnchorRecord>> {
        self.with_reader(|conn| anchor_ops::get_record(conn, contact_id))
    }

    fn list(&self) -> WarmthResult<Vec<Anchor>> {
        let records = self.with_reader(anchor_ops::list_records)?;
        Ok(records.into_iter().map(|r| r.anchor).collect())
    }

    fn compare_and_swap(
        &self,
        expected: &Anchor,
        new: &Anchor,
        display: &DisplaySnapshot,
        mutation: &AnchorMutation,
    ) -> WarmthResult<CasOutcome> {
        check_mutation(expected, new, mutation)?;

        self.in_transaction("compare_and_swap", |conn| {
            if !anchor_ops::swap_anchor(conn, expected, new, display)? {
                return Ok((CasOutcome::Conflict, false));
            }
            AuditLogger::record(conn, mutation)?;
            Ok((CasOutcome::Swapped, true))
        })
    }

    fn mode_changes(&self, contact_id: &str) -> WarmthResult<Vec<ModeChangeLogEntry>> {
        self.with_reader(|conn| audit_ops::mode_changes_for(conn, contact_id))
    }

    fn boosts(&self, contact_id: &str) -> WarmthResult<Vec<BoostLogEntry>> {
        self.with_reader(|conn| audit_ops::boosts_for(conn, contact_id))
    }

    fn history(&self, contact_id: &str) -> WarmthResult<Vec<AnchorMutation>> {
        self.with_reader(|conn| AuditLogger::history(conn, contact_id))
    }
}
