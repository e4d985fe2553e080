//! Overwrite one board's position measurements
//!
//! **Usage:**
//! ```bash
//! overwrite-position-measurement -B <batch> -b <board> <file.csv>
//! ```
//!
//! Only rows for the given board are used. Fails if the board has no
//! position measurements yet (use `upload-position-measurements`).

use anyhow::{Context, Result};
use clap::Parser;
use sietch_qc::cli::{self, BoardArgs, ConfigArgs};
use sietch_qc::parsers::parse_position_files;
use sietch_qc::position::overwrite_board_positions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "overwrite-position-measurement")]
#[command(about = "Overwrite the position measurements of one board from a CSV file")]
#[command(version)]
struct Args {
    #[command(flatten)]
    target: BoardArgs,

    /// CSV file to parse
    #[arg(value_name = "FILE")]
    file: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();
    cli::log_build_info("overwrite-position-measurement");

    let key = args.target.key();
    let table = parse_position_files(&[&args.file], Some(key))?;

    let client = args.config.connect().await?;
    let written = overwrite_board_positions(&client, key, table)
        .await
        .with_context(|| format!("Overwriting {} from {}", key, args.file.display()))?;
    println!(
        "Overwrote QC position measurements for batch {} board {}",
        written.batch, written.board
    );
    Ok(())
}
