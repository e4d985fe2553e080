//! Overwrite thickness measurements for one board
//!
//! **Usage:**
//! ```bash
//! overwrite-thickness-measurement -B <batch> -b <board> <label>.csv...
//! ```
//!
//! Only labels the board already has are replaced; other labels are skipped
//! with a warning (use `upload-thickness-measurements` for those).

use anyhow::Result;
use clap::Parser;
use sietch_qc::cli::{self, BoardArgs, ConfigArgs};
use sietch_qc::parsers::parse_thickness_files;
use sietch_qc::thickness::{apply_thickness_measurements, ThicknessMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "overwrite-thickness-measurement")]
#[command(about = "Overwrite existing thickness measurements of one board")]
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
    cli::log_build_info("overwrite-thickness-measurement");

    let inputs = parse_thickness_files(&args.files)?;
    let client = args.config.connect().await?;
    let outcome =
        apply_thickness_measurements(&client, args.target.key(), inputs, ThicknessMode::Overwrite)
            .await?;

    if outcome.wrote() {
        println!(
            "Overwrote batch {} board {} measurements {}",
            args.target.batch,
            args.target.board,
            outcome.applied.join(", ")
        );
    } else {
        println!("No data to upload");
    }
    Ok(())
}
