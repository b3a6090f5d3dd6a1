// Single source of truth for all default values.

use crate::models::{Band, DecayMode};

// --- Decay (λ per day) ---
pub const DEFAULT_LAMBDA_SLOW: f64 = 0.040132;
pub const DEFAULT_LAMBDA_MEDIUM: f64 = 0.085998;
pub const DEFAULT_LAMBDA_FAST: f64 = 0.171996;
pub const DEFAULT_LAMBDA_TEST: f64 = 55.26; // half-life ≈ 18 minutes
pub const DEFAULT_MODE: DecayMode = DecayMode::Medium;
pub const DEFAULT_INITIAL_SCORE: f64 = 100.0;
pub const DEFAULT_ALLOW_TEST_MODE: bool = false;

// --- Bands (evaluated top-down, first match wins) ---
pub const DEFAULT_BAND_THRESHOLDS: [(Band, f64); 4] = [
    (Band::Hot, 75.0),
    (Band::Warm, 50.0),
    (Band::Cool, 25.0),
    (Band::Cold, 0.0),
];

// --- Boost impulses (score points) ---
pub const DEFAULT_IMPULSE_EMAIL: f64 = 5.0;
pub const DEFAULT_IMPULSE_SMS: f64 = 4.0;
pub const DEFAULT_IMPULSE_DM: f64 = 4.0;
pub const DEFAULT_IMPULSE_CALL: f64 = 7.0;
pub const DEFAULT_IMPULSE_MEETING: f64 = 9.0;
pub const DEFAULT_IMPULSE_NOTE: f64 = 3.0;
pub const DEFAULT_IMPULSE_OTHER: f64 = 5.0;
pub const DEFAULT_MAX_FUTURE_SKEW_SECS: u64 = 300;

// --- Concurrency ---
pub const DEFAULT_MAX_CAS_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 10;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "warmth.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Server ---
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
