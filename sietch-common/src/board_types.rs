//! Board type codes
//!
//! A board type code is three characters: position (`H`ead or `E`dge),
//! layer (`X`, `V`, `U` or `G`) and subtype (`1`..`6`), e.g. `HX1` or `EG6`.
//! Records store the expanded value (`"Head X 1"`), which is what batch and
//! board type comparisons use.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Board position on the module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BoardPosition {
    Head,
    Edge,
}

impl BoardPosition {
    const ALL: [BoardPosition; 2] = [BoardPosition::Head, BoardPosition::Edge];

    fn code(self) -> char {
        match self {
            BoardPosition::Head => 'H',
            BoardPosition::Edge => 'E',
        }
    }

    fn name(self) -> &'static str {
        match self {
            BoardPosition::Head => "Head",
            BoardPosition::Edge => "Edge",
        }
    }
}

/// Detector layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Layer {
    X,
    V,
    U,
    G,
}

impl Layer {
    const ALL: [Layer; 4] = [Layer::X, Layer::V, Layer::U, Layer::G];

    fn code(self) -> char {
        match self {
            Layer::X => 'X',
            Layer::V => 'V',
            Layer::U => 'U',
            Layer::G => 'G',
        }
    }
}

/// Highest subtype number
const MAX_SUBTYPE: u8 = 6;

/// A validated board type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardType {
    position: BoardPosition,
    layer: Layer,
    subtype: u8,
}

impl BoardType {
    /// Every known board type, in code order (HX1, HX2, ..., EG6)
    pub fn all() -> Vec<BoardType> {
        let mut types = Vec::with_capacity(48);
        for position in BoardPosition::ALL {
            for layer in Layer::ALL {
                for subtype in 1..=MAX_SUBTYPE {
                    types.push(BoardType {
                        position,
                        layer,
                        subtype,
                    });
                }
            }
        }
        types
    }

    /// Short command-line code, e.g. `HX1`
    pub fn code(&self) -> String {
        format!("{}{}{}", self.position.code(), self.layer.code(), self.subtype)
    }

    /// Value stored in the `boardType` field of batch and board records
    pub fn value(&self) -> String {
        format!("{} {} {}", self.position.name(), self.layer.code(), self.subtype)
    }
}

impl FromStr for BoardType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        BoardType::all()
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Unknown board type '{}' (expected [H|E][X|V|U|G][1-{}])",
                    s, MAX_SUBTYPE
                ))
            })
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codes_are_unique() {
        let all = BoardType::all();
        assert_eq!(all.len(), 48);

        let mut codes: Vec<String> = all.iter().map(|t| t.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 48);
    }

    #[test]
    fn test_parse_code() {
        let t: BoardType = "HX1".parse().unwrap();
        assert_eq!(t.code(), "HX1");
        assert_eq!(t.value(), "Head X 1");

        let t: BoardType = "eg6".parse().unwrap();
        assert_eq!(t.code(), "EG6");
        assert_eq!(t.value(), "Edge G 6");
    }

    #[test]
    fn test_parse_rejects_unknown_codes() {
        assert!("HX7".parse::<BoardType>().is_err());
        assert!("HZ1".parse::<BoardType>().is_err());
        assert!("".parse::<BoardType>().is_err());
        assert!("HX10".parse::<BoardType>().is_err());
    }
}
