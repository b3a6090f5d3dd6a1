/// Warmth subsystem version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest possible warmth score.
pub const SCORE_MIN: f64 = 0.0;

/// Highest possible warmth score.
pub const SCORE_MAX: f64 = 100.0;

/// Asymptotic floor of the decay curve (`WMIN`).
pub const DECAY_FLOOR: f64 = 0.0;

/// Milliseconds per day, the unit λ is expressed in.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Absolute tolerance for score continuity at a switch instant.
pub const CONTINUITY_EPSILON: f64 = 1e-6;

/// Maximum visible score jump accepted across a mode switch.
pub const CONTINUITY_DISPLAY_TOLERANCE: f64 = 0.01;
