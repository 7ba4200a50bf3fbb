//! The resolved 5×3 symbol grid

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::symbols::SymbolId;

/// Number of reels (columns)
pub const REELS: usize = 5;
/// Visible rows per reel
pub const ROWS: usize = 3;

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub reel: u8,
    pub row: u8,
}

impl Position {
    pub const fn new(reel: u8, row: u8) -> Self {
        Self { reel, row }
    }
}

/// Fully resolved grid, stored reel-major (`cells[reel][row]`).
///
/// The fixed array shape makes a malformed grid unrepresentable once built.
/// Serializes as the same bare reel-major array requests use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[SymbolId; ROWS]; REELS],
}

impl Grid {
    /// Build from reel columns
    pub const fn from_reels(cells: [[SymbolId; ROWS]; REELS]) -> Self {
        Self { cells }
    }

    /// Build from visual rows (`rows[row][reel]`), handy in tests and fixtures
    pub fn from_rows(rows: [[SymbolId; REELS]; ROWS]) -> Self {
        let mut cells = [[SymbolId::Wild; ROWS]; REELS];
        for (row, symbols) in rows.iter().enumerate() {
            for (reel, &symbol) in symbols.iter().enumerate() {
                cells[reel][row] = symbol;
            }
        }
        Self { cells }
    }

    /// Every cell holds the same symbol
    pub const fn filled(symbol: SymbolId) -> Self {
        Self {
            cells: [[symbol; ROWS]; REELS],
        }
    }

    /// Validate and translate a wire matrix (reel-major, symbol names).
    pub fn from_wire<S: AsRef<str>>(reels: &[Vec<S>]) -> Result<Self, ValidationError> {
        if reels.len() != REELS {
            return Err(ValidationError::GridShape {
                reels: reels.len(),
                rows: reels.first().map(Vec::len).unwrap_or(0),
            });
        }
        if let Some(bad) = reels.iter().find(|column| column.len() != ROWS) {
            return Err(ValidationError::GridShape {
                reels: reels.len(),
                rows: bad.len(),
            });
        }

        let mut cells = [[SymbolId::Wild; ROWS]; REELS];
        for (reel, column) in reels.iter().enumerate() {
            for (row, raw) in column.iter().enumerate() {
                cells[reel][row] = SymbolId::from_wire(raw.as_ref())?;
            }
        }
        Ok(Self { cells })
    }

    /// Wire form: reel-major canonical names
    pub fn to_wire(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|column| column.iter().map(|s| s.wire_name().to_string()).collect())
            .collect()
    }

    pub fn get(&self, position: Position) -> SymbolId {
        self.cells[position.reel as usize][position.row as usize]
    }

    /// Symbols of one reel, top to bottom
    pub fn reel(&self, reel: usize) -> &[SymbolId; ROWS] {
        &self.cells[reel]
    }

    pub(crate) fn fill_reel(&mut self, reel: usize, symbol: SymbolId) {
        self.cells[reel] = [symbol; ROWS];
    }

    /// All cells with their positions, reel by reel
    pub fn iter(&self) -> impl Iterator<Item = (Position, SymbolId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(reel, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(row, &symbol)| (Position::new(reel as u8, row as u8), symbol))
        })
    }
}
