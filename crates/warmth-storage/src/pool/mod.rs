//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::PathBuf;
use std::sync::Arc;

use warmth_core::errors::WarmthResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
///
/// File-backed pools are assembled by `StorageEngine`, which migrates the
/// schema through the writer before opening readers.
pub struct ConnectionPool {
    pub writer: Arc<WriteConnection>,
    /// `None` for in-memory databases, whose reads go through the writer.
    pub readers: Option<Arc<ReadPool>>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open an in-memory connection pool (for testing). A separate
    /// in-memory connection would be a separate database, so there are no
    /// readers.
    pub fn open_in_memory() -> WarmthResult<Self> {
        Ok(Self {
            writer: Arc::new(WriteConnection::open_in_memory()?),
            readers: None,
            db_path: None,
        })
    }
}
