//! Expanding wilds on the middle reels

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::symbols::SymbolId;

/// Reels eligible for expansion (0-based: the three middle reels)
pub const EXPANDING_REELS: [usize; 3] = [1, 2, 3];

/// Grid after expansion plus which reels expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildExpansion {
    pub grid: Grid,
    /// Ascending reel indices
    pub expanded_reels: Vec<u8>,
}

impl WildExpansion {
    pub fn occurred(&self) -> bool {
        !self.expanded_reels.is_empty()
    }
}

/// Expand every eligible reel that shows `wild` in the landed grid.
///
/// Single pass: all reels are classified against the untouched input before
/// any reel is overwritten, so an expansion can never feed another one.
/// The input grid is not modified.
pub fn expand_wilds(original: &Grid, wild: SymbolId) -> WildExpansion {
    let expanded_reels: Vec<u8> = EXPANDING_REELS
        .iter()
        .copied()
        .filter(|&reel| original.reel(reel).contains(&wild))
        .map(|reel| reel as u8)
        .collect();

    let mut grid = *original;
    for &reel in &expanded_reels {
        grid.fill_reel(reel as usize, wild);
    }

    if !expanded_reels.is_empty() {
        log::debug!("wild expansion on reels {:?}", expanded_reels);
    }

    WildExpansion { grid, expanded_reels }
}
