//! Generate a QR-code label for a board
//!
//! **Usage:**
//! ```bash
//! generate-label -B <batch> -b <board> [-d <directory>]
//! ```

use anyhow::Result;
use clap::Parser;
use sietch_qc::cli::{self, BoardArgs, ConfigArgs};
use sietch_qc::label::generate_label;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate-label")]
#[command(about = "Generate a QR-code label (SVG) linking to a board's record")]
#[command(version)]
struct Args {
    #[command(flatten)]
    target: BoardArgs,

    /// Image output directory
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();
    cli::log_build_info("generate-label");

    let client = args.config.connect().await?;
    let path = generate_label(&client, args.target.key(), &args.dir).await?;
    println!("{}", path.display());
    Ok(())
}
