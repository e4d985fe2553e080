//! Upload position measurements from CSV files
//!
//! **Usage:**
//! ```bash
//! upload-position-measurements <file.csv>...
//! ```
//!
//! Fails without writing anything if any board is missing from the database
//! or already has position measurements.

use anyhow::Result;
use clap::Parser;
use sietch_qc::cli::{self, ConfigArgs};
use sietch_qc::parsers::parse_position_files;
use sietch_qc::position::{apply_position_measurements, PositionMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "upload-position-measurements")]
#[command(about = "Read position measurements from CSV files and upload them to the database")]
#[command(version)]
struct Args {
    /// CSV files to parse
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();
    cli::log_build_info("upload-position-measurements");

    let table = parse_position_files(&args.files, None)?;
    if table.is_empty() {
        println!("No data to upload");
        return Ok(());
    }

    let client = args.config.connect().await?;
    let written = apply_position_measurements(&client, table, PositionMode::Upload).await?;
    for key in written {
        println!(
            "Uploaded QC position measurements for batch {} board {}",
            key.batch, key.board
        );
    }
    Ok(())
}
