//! Command-line plumbing shared by the tool binaries

use crate::parsers::BoardKey;
use clap::Args;
use sietch_common::config::load_config;
use sietch_common::{InventoryClient, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Config file selection
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Config file (default: $SIETCH_CONFIG, ./config.dat, then the user config dir)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the config and log in
    pub async fn connect(&self) -> Result<InventoryClient> {
        let config = load_config(self.config.as_deref())?;
        debug!(url = %config.url, "Using inventory service");
        InventoryClient::login(&config).await
    }
}

/// Target board
#[derive(Args, Debug, Clone, Copy)]
pub struct BoardArgs {
    /// Batch number
    #[arg(short = 'B', long = "batch")]
    pub batch: u32,

    /// Board number
    #[arg(short = 'b', long = "board")]
    pub board: u32,
}

impl BoardArgs {
    pub fn key(&self) -> BoardKey {
        BoardKey::new(self.batch, self.board)
    }
}

/// Install the log subscriber; `RUST_LOG` overrides the `info` default
///
/// Logs go to stderr so stdout only carries each tool's result lines.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Log build identification right after tracing init
pub fn log_build_info(tool: &str) {
    info!(
        "Starting {} v{} [{}] built {} ({})",
        tool,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
}
