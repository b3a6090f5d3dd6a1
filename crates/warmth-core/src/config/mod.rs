//! Configuration system for the warmth subsystem.
//! TOML-based, layered: CLI > env > file > defaults.

pub mod band_config;
pub mod boost_config;
pub mod concurrency_config;
pub mod decay_config;
pub mod defaults;
pub mod observability_config;
pub mod server_config;
pub mod storage_config;
pub mod warmth_config;

pub use band_config::{BandConfig, BandThreshold};
pub use boost_config::BoostConfig;
pub use concurrency_config::ConcurrencyConfig;
pub use decay_config::DecayConfig;
pub use observability_config::ObservabilityConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;
pub use warmth_config::{CliOverrides, WarmthConfig};
