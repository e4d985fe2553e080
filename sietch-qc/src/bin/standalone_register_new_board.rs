//! Register a single board in an existing batch
//!
//! **Usage:**
//! ```bash
//! standalone-register-new-board -B <batch> -b <board> -t <board type>
//! ```

use anyhow::Result;
use clap::Parser;
use sietch_common::BoardType;
use sietch_qc::cli::{self, BoardArgs, ConfigArgs};
use sietch_qc::registration::register_board;

#[derive(Parser, Debug)]
#[command(name = "standalone-register-new-board")]
#[command(about = "Register a new board in an already registered batch")]
#[command(version)]
struct Args {
    #[command(flatten)]
    target: BoardArgs,

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
    cli::log_build_info("standalone-register-new-board");

    let client = args.config.connect().await?;
    register_board(&client, args.target.batch, args.target.board, args.board_type).await?;

    println!(
        "Registered batch {} board {}",
        args.target.batch, args.target.board
    );
    Ok(())
}
