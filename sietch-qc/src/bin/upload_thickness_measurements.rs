//! Upload thickness measurements for one board
//!
//! **Usage:**
//! ```bash
//! upload-thickness-measurements -B <batch> -b <board> <label>.csv...
//! ```
//!
//! Each file name (without extension) is the measurement label. Labels the
//! board already has are skipped, never overwritten.

use anyhow::Result;
use clap::Parser;
use sietch_qc::cli::{self, BoardArgs, ConfigArgs};
use sietch_qc::parsers::parse_thickness_files;
use sietch_qc::thickness::{apply_thickness_measurements, ThicknessMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "upload-thickness-measurements")]
#[command(about = "Read thickness measurement files and upload them to the database")]
#[command(version)]
struct Args {
    #[command(flatten)]
    target: BoardArgs,

    /// Measurement files to parse
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();
    cli::log_build_info("upload-thickness-measurements");

    let inputs = parse_thickness_files(&args.files)?;
    let client = args.config.connect().await?;
    let outcome =
        apply_thickness_measurements(&client, args.target.key(), inputs, ThicknessMode::Upload)
            .await?;

    if outcome.wrote() {
        println!(
            "Uploaded QC thickness measurements for batch {} board {}: {}",
            args.target.batch,
            args.target.board,
            outcome.applied.join(", ")
        );
    } else {
        println!("No data to upload");
    }
    Ok(())
}
