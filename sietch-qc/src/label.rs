//! QR-code board labels
//!
//! A label encodes the URL of the board's record (`<base url>/<record id>`)
//! and is written as `Batch_<batch>_board_<board>.svg`.

use crate::parsers::BoardKey;
use qrcode::render::svg;
use qrcode::QrCode;
use sietch_common::{ComponentKind, Error, InventoryClient, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Smallest rendered edge length in SVG units
const MIN_DIMENSION: u32 = 200;

pub fn label_file_name(key: BoardKey) -> String {
    format!("Batch_{}_board_{}.svg", key.batch, key.board)
}

/// Encode `data` as a QR code rendered to an SVG document
pub fn render_qr_svg(data: &str) -> Result<String> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| Error::InvalidInput(format!("Cannot encode '{}' as QR code: {}", data, e)))?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Look up the board and write its label into `dir`, returning the file path
pub async fn generate_label(client: &InventoryClient, key: BoardKey, dir: &Path) -> Result<PathBuf> {
    let uuid = client
        .find_unique(ComponentKind::Board, &key.search_key())
        .await?;
    let url = client.record_url(&uuid);

    let image = render_qr_svg(&url)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(label_file_name(key));
    std::fs::write(&path, image)?;

    info!(batch = key.batch, board = key.board, url = %url, "Wrote label {}", path.display());
    Ok(path)
}
