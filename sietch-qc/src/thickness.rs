//! Thickness measurement upload and overwrite
//!
//! Upload only appends labels the board does not have yet; overwrite only
//! replaces values of labels the board already has. Labels that do not fit
//! the mode are skipped with a warning, and a run left with nothing to do
//! succeeds without writing.

use crate::parsers::BoardKey;
use sietch_common::records::{BoardData, ComponentRecord, ThicknessMeasurement};
use sietch_common::{ComponentKind, InventoryClient, Result};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThicknessMode {
    /// Append labels not yet stored
    Upload,
    /// Replace values of labels already stored
    Overwrite,
}

/// Labels written and labels skipped by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThicknessOutcome {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

impl ThicknessOutcome {
    /// True when the record was written
    pub fn wrote(&self) -> bool {
        !self.applied.is_empty()
    }
}

pub async fn apply_thickness_measurements(
    client: &InventoryClient,
    key: BoardKey,
    inputs: Vec<ThicknessMeasurement>,
    mode: ThicknessMode,
) -> Result<ThicknessOutcome> {
    let uuid = client
        .find_unique(ComponentKind::Board, &key.search_key())
        .await?;
    let mut record: ComponentRecord<BoardData> = client.fetch(&uuid).await?;

    let stored = record
        .data
        .qc_thickness_measurements
        .get_or_insert_with(Vec::new);
    let outcome = merge_thickness(stored, inputs, mode);

    if !outcome.wrote() {
        info!(batch = key.batch, board = key.board, "No data to upload");
        return Ok(outcome);
    }

    client.store(&uuid, &record).await?;
    info!(
        batch = key.batch,
        board = key.board,
        labels = ?outcome.applied,
        "{} QC thickness measurements",
        match mode {
            ThicknessMode::Upload => "Uploaded",
            ThicknessMode::Overwrite => "Overwrote",
        }
    );
    Ok(outcome)
}

/// Merge `inputs` into the stored list according to `mode`
pub fn merge_thickness(
    stored: &mut Vec<ThicknessMeasurement>,
    inputs: Vec<ThicknessMeasurement>,
    mode: ThicknessMode,
) -> ThicknessOutcome {
    let mut outcome = ThicknessOutcome::default();

    for input in inputs {
        let label = input.measurement_label.clone();
        let existing = stored.iter_mut().find(|m| m.measurement_label == label);

        match (mode, existing) {
            (ThicknessMode::Upload, Some(_)) => {
                warn!(label = %label, "Measurement {} already in database! will not overwrite!", label);
                outcome.skipped.push(label);
            }
            (ThicknessMode::Upload, None) => {
                stored.push(input);
                outcome.applied.push(label);
            }
            (ThicknessMode::Overwrite, Some(entry)) => {
                entry.measurement = input.measurement;
                outcome.applied.push(label);
            }
            (ThicknessMode::Overwrite, None) => {
                warn!(label = %label, "Measurement {} is not in the database! please use upload script!", label);
                outcome.skipped.push(label);
            }
        }
    }

    outcome
}
