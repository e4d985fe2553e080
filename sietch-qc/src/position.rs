//! Position measurement upload and overwrite
//!
//! Both modes run in three passes so that a bad target stops the run before
//! anything is written:
//! 1. resolve every board to exactly one record id,
//! 2. fetch every record and check its stored measurement,
//! 3. write all records.
//!
//! A failure during pass 3 can still leave earlier boards written; there
//! is no rollback.

use crate::parsers::{BoardKey, PositionTable};
use sietch_common::records::{BoardData, ComponentRecord};
use sietch_common::{ComponentKind, Error, InventoryClient, Result};
use tracing::{error, info};

/// What to do with boards that already hold position measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionMode {
    /// Refuse boards that already have measurements
    Upload,
    /// Require existing measurements and replace them
    Overwrite,
}

impl PositionMode {
    fn verb(self) -> &'static str {
        match self {
            PositionMode::Upload => "Uploaded",
            PositionMode::Overwrite => "Overwrote",
        }
    }
}

/// Apply parsed measurements, returning the boards written in order
pub async fn apply_position_measurements(
    client: &InventoryClient,
    table: PositionTable,
    mode: PositionMode,
) -> Result<Vec<BoardKey>> {
    // Pass 1: lookup
    let mut targets = Vec::with_capacity(table.len());
    let mut missing = Vec::new();
    let mut ambiguous = Vec::new();

    for (key, measurements) in table {
        match client
            .find_unique(ComponentKind::Board, &key.search_key())
            .await
        {
            Ok(uuid) => targets.push((key, uuid, measurements)),
            Err(Error::NotFound(msg)) => {
                error!(batch = key.batch, board = key.board, "{}", msg);
                missing.push(key);
            }
            Err(Error::Ambiguous(msg)) => {
                error!(batch = key.batch, board = key.board, "{}", msg);
                ambiguous.push(key);
            }
            Err(e) => return Err(e),
        }
    }

    if !missing.is_empty() {
        return Err(Error::NotFound(format!(
            "Bad board configurations found! Missing: {}{}",
            join(&missing),
            ambiguous_suffix(&ambiguous)
        )));
    }
    if !ambiguous.is_empty() {
        return Err(Error::Ambiguous(format!(
            "Bad board configurations found! Duplicated: {}",
            join(&ambiguous)
        )));
    }

    // Pass 2: fetch and check
    let mut pending: Vec<(BoardKey, String, ComponentRecord<BoardData>)> =
        Vec::with_capacity(targets.len());
    let mut rejected = Vec::new();

    for (key, uuid, measurements) in targets {
        let mut record: ComponentRecord<BoardData> = client.fetch(&uuid).await?;
        let measured = record.data.has_position_measurements();

        match mode {
            PositionMode::Upload if measured => {
                error!(
                    batch = key.batch,
                    board = key.board,
                    "Batch {} board {} already has position measurements, not overwriting!",
                    key.batch,
                    key.board
                );
                rejected.push(key);
                continue;
            }
            PositionMode::Overwrite if !measured => {
                error!(
                    batch = key.batch,
                    board = key.board,
                    "No previous measurements found for batch {} board {}!",
                    key.batch,
                    key.board
                );
                rejected.push(key);
                continue;
            }
            _ => {}
        }

        record.data.qc_position_measurements = Some(measurements);
        pending.push((key, uuid, record));
    }

    if !rejected.is_empty() {
        return Err(match mode {
            PositionMode::Upload => Error::Conflict(format!(
                "Boards with previous measurements found, not overwriting: {}",
                join(&rejected)
            )),
            PositionMode::Overwrite => Error::MissingPrecondition(format!(
                "No previous measurements found for {}",
                join(&rejected)
            )),
        });
    }

    // Pass 3: write
    let mut written = Vec::with_capacity(pending.len());
    for (key, uuid, record) in pending {
        client.store(&uuid, &record).await?;
        info!(
            batch = key.batch,
            board = key.board,
            "{} QC position measurements for batch {} board {}",
            mode.verb(),
            key.batch,
            key.board
        );
        written.push(key);
    }

    Ok(written)
}

/// Overwrite the stored measurement of one board
///
/// Rows for other boards in `table` are ignored. Fails before any lookup
/// when `table` holds nothing for `target`.
pub async fn overwrite_board_positions(
    client: &InventoryClient,
    target: BoardKey,
    mut table: PositionTable,
) -> Result<BoardKey> {
    let measurements = table.remove(&target).ok_or_else(|| {
        Error::InvalidInput(format!("No position measurements for {}", target))
    })?;

    let single = PositionTable::from([(target, measurements)]);
    apply_position_measurements(client, single, PositionMode::Overwrite).await?;
    Ok(target)
}

fn join(keys: &[BoardKey]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ambiguous_suffix(keys: &[BoardKey]) -> String {
    if keys.is_empty() {
        String::new()
    } else {
        format!("; duplicated: {}", join(keys))
    }
}
