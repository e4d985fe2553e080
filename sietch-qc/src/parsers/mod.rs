//! Measurement input parsers

pub mod position_csv;
pub mod thickness_file;

pub use position_csv::{parse_position_files, PositionTable};
pub use thickness_file::parse_thickness_files;

use sietch_common::SearchKey;
use std::fmt;

/// A board's business key: `(batchId, boardId)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoardKey {
    pub batch: u32,
    pub board: u32,
}

impl BoardKey {
    pub fn new(batch: u32, board: u32) -> Self {
        Self { batch, board }
    }

    pub fn search_key(&self) -> SearchKey {
        SearchKey::board(self.batch, self.board)
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch {} board {}", self.batch, self.board)
    }
}
