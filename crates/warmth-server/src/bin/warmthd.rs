//! `warmthd`: serve the warmth scoring API over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use warmth_core::clock::SystemClock;
use warmth_core::config::{CliOverrides, WarmthConfig};
use warmth_scoring::ScoringService;
use warmth_server::tracing_setup::init_tracing;
use warmth_server::AppState;
use warmth_storage::StorageEngine;

#[derive(Debug, Parser)]
#[command(name = "warmthd", version, about = "Warmth score decay service")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, env = "WARMTH_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database path (`:memory:` for an ephemeral store).
    #[arg(long)]
    db_path: Option<String>,

    /// Listen address, e.g. 127.0.0.1:8080.
    #[arg(long)]
    bind: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    /// Allow the debug-only `test` decay mode.
    #[arg(long)]
    allow_test_mode: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            db_path: self.db_path.clone(),
            bind: self.bind.clone(),
            log_level: self.log_level.clone(),
            allow_test_mode: self.allow_test_mode.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = WarmthConfig::load(args.config.as_deref(), Some(&args.overrides()))
        .context("loading configuration")?;
    init_tracing(&config.observability);

    let storage = StorageEngine::from_config(&config.storage)
        .with_context(|| format!("opening warmth store at {}", config.storage.db_path))?;
    let service = ScoringService::new(Arc::new(storage), Arc::new(SystemClock), &config);

    if config.decay.allow_test_mode {
        tracing::warn!("test decay mode is selectable; do not enable in production");
    }

    warmth_server::serve(AppState::new(service), &config.server.bind).await?;
    Ok(())
}
