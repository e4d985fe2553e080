//! Typed component records
//!
//! Fetched records are projected onto [`ComponentRecord`]: only the `type`
//! and `data` members survive, everything else the service returns
//! (timestamps, history, ids) is dropped before a record is posted back.
//! Inside `data`, fields this crate does not model are carried through
//! untouched via `#[serde(flatten)]`.

use crate::board_types::BoardType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `boardStatus` given to freshly registered boards
pub const BOARD_STATUS_RECEIVED: &str = "received";

/// Record envelope accepted by `POST /api/component/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord<D> {
    #[serde(rename = "type")]
    pub component_type: String,
    pub data: D,
}

impl<D> ComponentRecord<D> {
    pub fn new(component_type: impl Into<String>, data: D) -> Self {
        Self {
            component_type: component_type.into(),
            data,
        }
    }
}

/// Data of a batch record at creation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatch {
    pub name: String,
    pub batch_id: u32,
    pub number: u32,
    pub board_type: String,
}

impl NewBatch {
    pub fn new(batch_id: u32, number: u32, board_type: BoardType) -> Self {
        Self {
            name: format!("Batch {}", batch_id),
            batch_id,
            number,
            board_type: board_type.value(),
        }
    }
}

/// Data of a board record at creation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub name: String,
    pub batch_id: u32,
    pub board_id: u32,
    pub board_type: String,
    pub board_status: String,
}

impl NewBoard {
    pub fn new(batch_id: u32, board_id: u32, board_type: BoardType) -> Self {
        Self {
            name: format!("Batch {} board {}", batch_id, board_id),
            batch_id,
            board_id,
            board_type: board_type.value(),
            board_status: BOARD_STATUS_RECEIVED.to_string(),
        }
    }
}

/// Data of a fetched batch record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchData {
    #[serde(default)]
    pub board_type: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Data of a fetched board record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qc_position_measurements: Option<PositionMeasurements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qc_thickness_measurements: Option<Vec<ThicknessMeasurement>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl BoardData {
    /// True when a position measurement with a non-empty timestamp is stored
    pub fn has_position_measurements(&self) -> bool {
        self.qc_position_measurements
            .as_ref()
            .map(|m| !m.measurement_time.is_empty())
            .unwrap_or(false)
    }

    /// Labels of stored thickness measurements, in stored order
    pub fn thickness_labels(&self) -> Vec<&str> {
        self.qc_thickness_measurements
            .iter()
            .flatten()
            .map(|m| m.measurement_label.as_str())
            .collect()
    }
}

/// `qcPositionMeasurements`: timestamp plus `position<Field>` values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionMeasurements {
    #[serde(default)]
    pub measurement_time: String,
    /// `position<Field>` values plus any member another writer stored
    #[serde(flatten)]
    pub positions: Map<String, Value>,
}

impl PositionMeasurements {
    pub fn new(measurement_time: impl Into<String>) -> Self {
        Self {
            measurement_time: measurement_time.into(),
            positions: Map::new(),
        }
    }
}

/// One `qcThicknessMeasurements` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThicknessMeasurement {
    pub measurement_label: String,
    #[serde(default)]
    pub measurement: Vec<f64>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ThicknessMeasurement {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            measurement_label: label.into(),
            measurement: values,
            other: Map::new(),
        }
    }
}
