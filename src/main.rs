//! TaskHub: a small project and task tracking service over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, timeout, body limit)
//!                         │
//!                         ▼
//!                     http::handlers ──▶ domain::validation
//!                         │
//!                         ▼
//!                     store (SQLite, one transaction per write)
//!                         │
//!     Client Response     ▼
//!     ◀────────────── http::response / http::error (JSON envelopes)
//!
//!     Cross-cutting: config, observability (logs, metrics), lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;

use taskhub::config::{self, ConfigError};
use taskhub::lifecycle::{signals, startup, Shutdown};
use taskhub::observability::logging;

#[derive(Parser)]
#[command(name = "taskhub")]
#[command(about = "Project and task tracking API", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding config and TASKHUB_BIND_ADDRESS.
    #[arg(short, long)]
    bind: Option<String>,

    /// Database URL, overriding config and DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = config::read_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    config::validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "taskhub starting");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    startup::run(config, shutdown).await?;
    Ok(())
}
