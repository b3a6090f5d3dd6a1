//! Error handling for the warmth subsystem.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod storage_error;
pub mod warmth_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use storage_error::StorageError;
pub use warmth_error::{WarmthError, WarmthResult};
