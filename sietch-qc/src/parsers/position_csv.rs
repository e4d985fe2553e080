//! Position measurement CSV files
//!
//! The first row is the header. `BATCH_ID`, `BOARD_ID` and
//! `Measurement time` locate the board and timestamp; every `1:<name>` or
//! `2:<name>` column is a measurement stored as `position<Name>`. Rows with
//! an empty `BATCH_ID` cell carry tolerances and are skipped.

use super::BoardKey;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use sietch_common::casing::camel_case;
use sietch_common::records::PositionMeasurements;
use serde_json::Value;
use sietch_common::{Error, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub const HEADER_BATCH: &str = "BATCH_ID";
pub const HEADER_BOARD: &str = "BOARD_ID";
pub const HEADER_TIME: &str = "Measurement time";

/// `03/01/2024 02:05:09 PM`
const INPUT_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";
/// `2024-03-01 14:05:09`
const STORED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Measurements per board, ordered by batch then board
pub type PositionTable = BTreeMap<BoardKey, PositionMeasurements>;

/// Record key for a measurement column header, if it is one
///
/// `"1:Gap Width"` → `positionGapWidth`, `"2:x-pos"` → `positionXPos`.
pub fn measurement_key(header: &str) -> Option<String> {
    let mut parts = header.split(':');
    let prefix = parts.next()?;
    let name = parts.next()?;
    match prefix {
        "1" | "2" => Some(format!("position{}", camel_case(name))),
        _ => None,
    }
}

/// Convert the instrument's timestamp into the stored form
pub fn parse_measurement_time(value: &str) -> Result<String> {
    let parsed = NaiveDateTime::parse_from_str(value.trim(), INPUT_TIME_FORMAT)
        .map_err(|e| Error::Parse(format!("Invalid measurement time '{}': {}", value, e)))?;
    Ok(parsed.format(STORED_TIME_FORMAT).to_string())
}

/// Parse every file into one table
///
/// With `target` set, rows for any other board are ignored.
pub fn parse_position_files<P: AsRef<Path>>(
    paths: &[P],
    target: Option<BoardKey>,
) -> Result<PositionTable> {
    let mut table = PositionTable::new();
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Parse(format!("Cannot read {}: {}", path.display(), e))
        })?;
        parse_position_reader(file, &path.display().to_string(), target, &mut table)?;
    }
    Ok(table)
}

/// Column positions resolved from a header row
struct Columns {
    batch: usize,
    board: usize,
    time: usize,
    measurements: Vec<(usize, String)>,
}

impl Columns {
    fn from_header(header: &StringRecord, source: &str) -> Result<Self> {
        let mut batch = None;
        let mut board = None;
        let mut time = None;
        let mut measurements = Vec::new();

        for (pos, cell) in header.iter().enumerate() {
            let cell = cell.trim_start_matches('\u{feff}');
            match cell {
                HEADER_BATCH => batch = Some(pos),
                HEADER_BOARD => board = Some(pos),
                HEADER_TIME => time = Some(pos),
                _ => {
                    if let Some(key) = measurement_key(cell) {
                        measurements.push((pos, key));
                    }
                }
            }
        }

        let missing = |name: &str| Error::Parse(format!("{}: missing '{}' column", source, name));
        Ok(Self {
            batch: batch.ok_or_else(|| missing(HEADER_BATCH))?,
            board: board.ok_or_else(|| missing(HEADER_BOARD))?,
            time: time.ok_or_else(|| missing(HEADER_TIME))?,
            measurements,
        })
    }
}

/// Parse one CSV stream into `table`
///
/// `source` names the stream in error messages.
pub fn parse_position_reader<R: Read>(
    reader: R,
    source: &str,
    target: Option<BoardKey>,
    table: &mut PositionTable,
) -> Result<()> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();
    let header = match records.next() {
        Some(result) => {
            result.map_err(|e: csv::Error| Error::Parse(format!("{}: {}", source, e)))?
        }
        None => return Ok(()),
    };
    let cols = Columns::from_header(&header, source)?;
    let mut rows = 0usize;

    for result in records {
        let record =
            result.map_err(|e: csv::Error| Error::Parse(format!("{}: {}", source, e)))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |pos: usize| record.get(pos).unwrap_or("").trim();
        let at = |msg: String| Error::Parse(format!("{}:{}: {}", source, line, msg));

        // Tolerance rows
        if cell(cols.batch).is_empty() {
            continue;
        }

        let batch: u32 = cell(cols.batch)
            .parse()
            .map_err(|_| at(format!("invalid {} '{}'", HEADER_BATCH, cell(cols.batch))))?;
        let board: u32 = cell(cols.board)
            .parse()
            .map_err(|_| at(format!("invalid {} '{}'", HEADER_BOARD, cell(cols.board))))?;
        let key = BoardKey::new(batch, board);

        if target.is_some_and(|t| t != key) {
            continue;
        }

        let time = parse_measurement_time(cell(cols.time)).map_err(|e| at(e.to_string()))?;
        let entry = table
            .entry(key)
            .or_insert_with(|| PositionMeasurements::new(time));

        for (pos, name) in &cols.measurements {
            let value = cell(*pos)
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .ok_or_else(|| at(format!("invalid value '{}' for {}", cell(*pos), name)))?;
            entry.positions.insert(name.clone(), Value::Number(value));
        }
        rows += 1;
    }

    debug!(source, rows, boards = table.len(), "Parsed position measurements");
    Ok(())
}
