//! Thickness measurement files
//!
//! One file per measurement position: the file stem is the label and every
//! non-blank line holds one value.

use sietch_common::records::ThicknessMeasurement;
use sietch_common::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Label for a thickness file (`/data/P3.csv` → `P3`)
pub fn thickness_label(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::InvalidInput(format!("Cannot derive a label from {}", path.display()))
        })
}

/// Parse the values of one file
pub fn parse_thickness_values(content: &str, source: &str) -> Result<Vec<f64>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| {
                    Error::Parse(format!("{}:{}: invalid value '{}'", source, idx + 1, line.trim()))
                })
        })
        .collect()
}

/// Parse files into entries, in argument order
///
/// A label given twice keeps its first position and the last file's values.
pub fn parse_thickness_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ThicknessMeasurement>> {
    let mut entries: Vec<ThicknessMeasurement> = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let label = thickness_label(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Parse(format!("Cannot read {}: {}", path.display(), e)))?;
        let values = parse_thickness_values(&content, &path.display().to_string())?;
        debug!(label = %label, values = values.len(), "Parsed thickness file");

        match entries.iter_mut().find(|e| e.measurement_label == label) {
            Some(existing) => {
                warn!(label = %label, "Label given more than once, keeping {}", path.display());
                existing.measurement = values;
            }
            None => entries.push(ThicknessMeasurement::new(label, values)),
        }
    }

    Ok(entries)
}
