use warmth_core::config::*;
use warmth_core::errors::ConfigError;
use warmth_core::models::{Band, Channel, DecayMode};

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = WarmthConfig::from_toml("").unwrap();

    // Decay defaults
    assert_eq!(config.decay.lambda(DecayMode::Slow), 0.040132);
    assert_eq!(config.decay.lambda(DecayMode::Medium), 0.085998);
    assert_eq!(config.decay.lambda(DecayMode::Fast), 0.171996);
    assert_eq!(config.decay.lambda(DecayMode::Test), 55.26);
    assert_eq!(config.decay.default_mode, DecayMode::Medium);
    assert_eq!(config.decay.initial_score, 100.0);
    assert!(!config.decay.allow_test_mode);

    // Band defaults
    let bands: Vec<(Band, f64)> = config
        .bands
        .thresholds
        .iter()
        .map(|t| (t.band, t.min_score))
        .collect();
    assert_eq!(
        bands,
        vec![
            (Band::Hot, 75.0),
            (Band::Warm, 50.0),
            (Band::Cool, 25.0),
            (Band::Cold, 0.0)
        ]
    );

    // Boost defaults
    assert_eq!(config.boost.impulse(Channel::Meeting), 9.0);
    assert_eq!(config.boost.impulse(Channel::Note), 3.0);
    assert_eq!(config.boost.max_future_skew_secs, 300);

    // Concurrency defaults
    assert_eq!(config.concurrency.max_cas_attempts, 3);

    // Storage / server / observability defaults
    assert_eq!(config.storage.db_path, "warmth.db");
    assert_eq!(config.storage.read_pool_size, 4);
    assert_eq!(config.server.bind, "127.0.0.1:8080");
    assert_eq!(config.observability.log_level, "info");

    config.validate().unwrap();
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[decay]
default_mode = "slow"
allow_test_mode = true

[boost]
meeting = 12.0

[[bands.thresholds]]
band = "hot"
min_score = 80.0

[[bands.thresholds]]
band = "cold"
min_score = 0.0
"#;
    let config = WarmthConfig::from_toml(toml).unwrap();
    assert_eq!(config.decay.default_mode, DecayMode::Slow);
    assert!(config.decay.allow_test_mode);
    assert_eq!(config.boost.impulse(Channel::Meeting), 12.0);
    // Non-overridden fields keep defaults
    assert_eq!(config.boost.impulse(Channel::Call), 7.0);
    assert_eq!(config.bands.thresholds.len(), 2);
    config.validate().unwrap();
}

#[test]
fn test_mode_only_selectable_when_allowed() {
    let mut config = WarmthConfig::default();
    assert!(!config.decay.selectable_modes().contains(&DecayMode::Test));
    config.decay.allow_test_mode = true;
    assert!(config.decay.selectable_modes().contains(&DecayMode::Test));
}

#[test]
fn validation_rejects_non_descending_bands() {
    let mut config = WarmthConfig::default();
    config.bands.thresholds.swap(0, 1);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "bands.thresholds"));
}

#[test]
fn validation_rejects_band_table_without_zero_floor() {
    let mut config = WarmthConfig::default();
    config.bands.thresholds.pop();
    assert!(config.validate().is_err());
}

#[test]
fn validation_rejects_duplicate_band() {
    let mut config = WarmthConfig::default();
    config.bands.thresholds[1].band = Band::Hot;
    assert!(config.validate().is_err());
}

#[test]
fn validation_rejects_bad_lambda_and_zero_attempts() {
    let mut config = WarmthConfig::default();
    config.decay.lambda_fast = 0.0;
    assert!(config.validate().is_err());

    let mut config = WarmthConfig::default();
    config.concurrency.max_cas_attempts = 0;
    assert!(config.validate().is_err());
}

#[test]
fn validation_rejects_test_default_mode_unless_allowed() {
    let mut config = WarmthConfig::default();
    config.decay.default_mode = DecayMode::Test;
    assert!(config.validate().is_err());
    config.decay.allow_test_mode = true;
    config.validate().unwrap();
}

#[test]
fn env_overrides_apply_before_cli() {
    let mut config = WarmthConfig::default();
    config.apply_env_overrides(|key| match key {
        "WARMTH_DB_PATH" => Some("/env/warmth.db".to_string()),
        "WARMTH_BIND" => Some("0.0.0.0:9000".to_string()),
        "WARMTH_DEFAULT_MODE" => Some("fast".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.storage.db_path, "/env/warmth.db");
    assert_eq!(config.decay.default_mode, DecayMode::Fast);

    config.apply_cli_overrides(&CliOverrides {
        bind: Some("127.0.0.1:7000".to_string()),
        ..Default::default()
    });
    assert_eq!(config.server.bind, "127.0.0.1:7000");
    assert_eq!(config.storage.db_path, "/env/warmth.db");
}

#[test]
fn bad_env_values_are_reported() {
    let mut config = WarmthConfig::default();
    let err = config
        .apply_env_overrides(|key| (key == "WARMTH_DEFAULT_MODE").then(|| "glacial".to_string()))
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "WARMTH_DEFAULT_MODE"
    ));
    assert_eq!(config.decay.default_mode, DecayMode::Medium);

    let err = config
        .apply_env_overrides(|key| (key == "WARMTH_ALLOW_TEST_MODE").then(|| "maybe".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    assert!(!config.decay.allow_test_mode);
}

#[test]
fn load_reads_file_and_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warmth.toml");
    std::fs::write(&path, "[storage]\nread_pool_size = 2\n").unwrap();

    let config = WarmthConfig::load(Some(&path), None).unwrap();
    assert_eq!(config.storage.read_pool_size, 2);

    let missing = dir.path().join("nope.toml");
    let err = WarmthConfig::load(Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_serde_roundtrip() {
    let config = WarmthConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = WarmthConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.bands, config.bands);
    assert_eq!(roundtripped.decay.lambda_medium, config.decay.lambda_medium);
}
