use super::error_code::{self, ErrorCode};
use super::{ConfigError, StorageError};

pub type WarmthResult<T> = Result<T, WarmthError>;

/// Top-level error for every warmth operation.
///
/// Clock skew and unreachable inverse queries are not errors: skew is
/// reported alongside the result, an unreachable target is a sentinel value.
#[derive(Debug, thiserror::Error)]
pub enum WarmthError {
    #[error("contact not found: {contact_id}")]
    ContactNotFound { contact_id: String },

    #[error("warmth anchor already exists for contact {contact_id}")]
    AlreadyExists { contact_id: String },

    #[error("validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("concurrent update conflict on contact {contact_id} after {attempts} attempts")]
    ConcurrencyConflict { contact_id: String, attempts: u32 },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WarmthError {
    pub fn not_found(contact_id: impl Into<String>) -> Self {
        Self::ContactNotFound {
            contact_id: contact_id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the caller may safely retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConcurrencyConflict { .. } | Self::Storage(StorageError::Busy { .. })
        )
    }
}

impl ErrorCode for WarmthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ContactNotFound { .. } => error_code::NOT_FOUND,
            Self::AlreadyExists { .. } => error_code::ALREADY_EXISTS,
            Self::Validation { .. } => error_code::VALIDATION_ERROR,
            Self::ConcurrencyConflict { .. } => error_code::CONCURRENCY_CONFLICT,
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
