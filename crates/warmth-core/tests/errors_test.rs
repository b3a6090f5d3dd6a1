use warmth_core::errors::{ConfigError, ErrorCode, StorageError, WarmthError};

#[test]
fn error_codes_follow_taxonomy() {
    assert_eq!(WarmthError::not_found("c-1").error_code(), "NOT_FOUND");
    assert_eq!(
        WarmthError::validation("mode", "bad").error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(
        WarmthError::ConcurrencyConflict {
            contact_id: "c-1".into(),
            attempts: 3
        }
        .error_code(),
        "CONCURRENCY_CONFLICT"
    );
    let busy: WarmthError = StorageError::Busy {
        message: "locked".into(),
    }
    .into();
    assert_eq!(busy.error_code(), "DB_BUSY");
    let cfg: WarmthError = ConfigError::FileNotFound { path: "x".into() }.into();
    assert_eq!(cfg.error_code(), "CONFIG_ERROR");
}

#[test]
fn only_conflicts_and_busy_are_retryable() {
    assert!(WarmthError::ConcurrencyConflict {
        contact_id: "c".into(),
        attempts: 3
    }
    .is_retryable());
    assert!(WarmthError::Storage(StorageError::Busy {
        message: "x".into()
    })
    .is_retryable());
    assert!(!WarmthError::not_found("c").is_retryable());
    assert!(!WarmthError::validation("f", "m").is_retryable());
}

#[test]
fn coded_string_prefixes_code() {
    let err = WarmthError::not_found("abc");
    assert_eq!(err.coded_string(), "[NOT_FOUND] contact not found: abc");
}
