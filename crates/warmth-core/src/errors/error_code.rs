//! Stable machine-readable error codes for the service boundary.

/// Every error enum implements this to expose a code string that callers
/// can branch on without parsing messages.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;

    /// `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CONCURRENCY_CONFLICT: &str = "CONCURRENCY_CONFLICT";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
