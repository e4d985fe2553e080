//! Batch and board registration
//!
//! A batch is registered once together with boards `1..=N`. Boards that
//! could not be registered during a batch run are collected rather than
//! aborting the run; they can be added afterwards one at a time with
//! [`register_board`].

use sietch_common::records::{BatchData, ComponentRecord, NewBatch, NewBoard};
use sietch_common::{BoardType, ComponentKind, Error, InventoryClient, Result, SearchKey};
use tracing::{error, info, warn};

/// Outcome of a batch registration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRegistration {
    pub batch: u32,
    pub batch_uuid: String,
    /// Boards registered in this run
    pub registered: Vec<u32>,
    /// Boards that already existed or failed to store
    pub failed: Vec<u32>,
}

impl BatchRegistration {
    /// `Err(Error::PartialFailure)` when any board failed
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(Error::PartialFailure {
                batch: self.batch,
                failed: self.failed,
            })
        }
    }
}

/// Register batch `batch` and its boards `1..=number`
///
/// Fails outright when the batch already exists or the batch record cannot
/// be stored. Per-board problems end up in [`BatchRegistration::failed`].
pub async fn register_batch(
    client: &InventoryClient,
    batch: u32,
    number: u32,
    board_type: BoardType,
) -> Result<BatchRegistration> {
    if number == 0 {
        return Err(Error::InvalidInput(
            "Number of boards must be at least 1".to_string(),
        ));
    }

    let existing = client
        .search(ComponentKind::Batch, &SearchKey::batch(batch))
        .await?;
    if !existing.is_empty() {
        return Err(Error::Conflict(format!(
            "Batch {} has already been registered",
            batch
        )));
    }

    let batch_uuid = client.generate_component_uuid().await?;
    let record = ComponentRecord::new(
        client.component_type(ComponentKind::Batch),
        NewBatch::new(batch, number, board_type),
    );
    if let Err(e) = client.store(&batch_uuid, &record).await {
        error!(batch, "Failed to register batch!");
        return Err(e);
    }
    info!(batch, number, board_type = %board_type, uuid = %batch_uuid, "Registered batch record");

    let mut registered = Vec::new();
    let mut failed = Vec::new();

    for board in 1..=number {
        let hits = client
            .search(ComponentKind::Board, &SearchKey::board(batch, board))
            .await?;
        if !hits.is_empty() {
            warn!(batch, board, "Batch {} board {} has already been registered!", batch, board);
            failed.push(board);
            continue;
        }

        let uuid = client.generate_component_uuid().await?;
        let record = ComponentRecord::new(
            client.component_type(ComponentKind::Board),
            NewBoard::new(batch, board, board_type),
        );
        match client.store(&uuid, &record).await {
            Ok(()) => registered.push(board),
            Err(e) => {
                warn!(
                    batch,
                    board,
                    error = %e,
                    "Failed to register batch {} board {}! Please run with standalone registration",
                    batch,
                    board
                );
                failed.push(board);
            }
        }
    }

    Ok(BatchRegistration {
        batch,
        batch_uuid,
        registered,
        failed,
    })
}

/// Register one board under an existing batch, returning its record id
///
/// The batch must exist exactly once and carry the same board type.
pub async fn register_board(
    client: &InventoryClient,
    batch: u32,
    board: u32,
    board_type: BoardType,
) -> Result<String> {
    let batch_uuid = client
        .find_unique(ComponentKind::Batch, &SearchKey::batch(batch))
        .await
        .map_err(|e| match e {
            Error::NotFound(_) => {
                Error::NotFound(format!("Batch {} has not been registered!", batch))
            }
            other => other,
        })?;

    let batch_record: ComponentRecord<BatchData> = client.fetch(&batch_uuid).await?;
    let requested = board_type.value();
    match batch_record.data.board_type.as_deref() {
        Some(registered) if registered == requested => {}
        registered => {
            return Err(Error::Conflict(format!(
                "Batch {} has been registered as '{}', but you are attempting to register a board of a different type '{}'",
                batch,
                registered.unwrap_or("<none>"),
                requested
            )));
        }
    }

    let hits = client
        .search(ComponentKind::Board, &SearchKey::board(batch, board))
        .await?;
    if !hits.is_empty() {
        return Err(Error::Conflict(format!(
            "Batch {} board {} has already been registered!",
            batch, board
        )));
    }

    let uuid = client.generate_component_uuid().await?;
    let record = ComponentRecord::new(
        client.component_type(ComponentKind::Board),
        NewBoard::new(batch, board, board_type),
    );
    client.store(&uuid, &record).await?;
    info!(batch, board, uuid = %uuid, "Registered board");

    Ok(uuid)
}
