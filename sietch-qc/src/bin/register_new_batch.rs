//! Register a new batch of boards
//!
//! **Usage:**
//! ```bash
//! register-new-batch -B <batch> -N <number of boards> -t <board type>
//! ```
//!
//! Boards are numbered 1 to N. Boards that fail to register are listed at
//! the end and the tool exits non-zero; add them with
//! `standalone-register-new-board`.

use anyhow::Result;
use clap::Parser;
use sietch_common::BoardType;
use sietch_qc::cli::{self, ConfigArgs};
use sietch_qc::registration::register_batch;

#[derive(Parser, Debug)]
#[command(name = "register-new-batch")]
#[command(about = "Register a new batch of boards in the system")]
#[command(version)]
struct Args {
    /// Batch number
    #[arg(short = 'B', long = "batch")]
    batch: u32,

    /// Total number of boards (will be labelled from 1 to N)
    #[arg(short = 'N', long = "number")]
    number: u32,

    /// Board type ([H]ead or [E]dge; [X|V|U|G] layer; subtype [1-6]), e.g. HX1
    #[arg(short = 't', long = "type")]
    board_type: BoardType,

    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();
    cli::log_build_info("register-new-batch");

    let client = args.config.connect().await?;
    let report = register_batch(&client, args.batch, args.number, args.board_type).await?;

    println!(
        "Registered batch {} with {} boards",
        report.batch,
        report.registered.len()
    );
    report.into_result()?;
    Ok(())
}
