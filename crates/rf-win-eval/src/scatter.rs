//! Scatter pays
//!
//! Scatters pay on the grid as it landed, before wild expansion, and in
//! multiples of the total stake rather than the line bet.

use serde::{Deserialize, Serialize};

use crate::credits::Credits;
use crate::grid::{Grid, Position};
use crate::registry::{PayEntry, SymbolRegistry, pays};
use crate::symbols::SymbolId;

/// How scatter symbols are counted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScatterCounting {
    /// Every cell showing the symbol counts once
    Cells,
    /// Each listed reel counts once if it shows the symbol anywhere
    Reels { reels: Vec<u8> },
}

/// Scatter pay rule for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterRule {
    pub symbol: SymbolId,
    pub counting: ScatterCounting,
    /// Count → total-stake multiplier
    pub pays: PayEntry,
}

impl ScatterRule {
    /// Dollar scatter anywhere, star scatter on reels 1, 3 and 5
    pub fn standard() -> Vec<Self> {
        vec![
            Self {
                symbol: SymbolId::DollarScatter,
                counting: ScatterCounting::Cells,
                pays: pays(&[(3, 5), (4, 20), (5, 100)]),
            },
            Self {
                symbol: SymbolId::StarScatter,
                counting: ScatterCounting::Reels { reels: vec![0, 2, 4] },
                pays: pays(&[(3, 20)]),
            },
        ]
    }

    /// Largest stake multiple this rule can pay
    pub fn top_pay(&self) -> u32 {
        self.pays.values().copied().max().unwrap_or(0)
    }

    /// Count and contributing positions on a grid
    fn count(&self, grid: &Grid) -> (u8, Vec<Position>) {
        match &self.counting {
            ScatterCounting::Cells => {
                let positions: Vec<Position> = grid
                    .iter()
                    .filter(|&(_, s)| s == self.symbol)
                    .map(|(p, _)| p)
                    .collect();
                (positions.len() as u8, positions)
            }
            ScatterCounting::Reels { reels } => {
                let mut count = 0u8;
                let mut positions = Vec::new();
                for &reel in reels {
                    let hits: Vec<Position> = grid
                        .iter()
                        .filter(|&(p, s)| p.reel == reel && s == self.symbol)
                        .map(|(p, _)| p)
                        .collect();
                    if !hits.is_empty() {
                        count += 1;
                        positions.extend(hits);
                    }
                }
                (count, positions)
            }
        }
    }
}

/// A paying scatter combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterWin {
    pub symbol: SymbolId,
    pub count: u8,
    /// Stake multiplier from the pay rule
    pub multiplier: u32,
    pub payout: Credits,
    pub positions: Vec<Position>,
}

impl ScatterWin {
    /// Contribution key, e.g. `"DollarScatter x3 (Scatter)"`
    pub fn combo_key(&self) -> String {
        format!("{} x{} (Scatter)", self.symbol, self.count)
    }
}

/// Evaluate every scatter rule against the pre-expansion grid.
///
/// Only exact count entries pay; a count without an entry pays nothing.
pub fn evaluate_scatters(grid: &Grid, total_stake: Credits, registry: &SymbolRegistry) -> Vec<ScatterWin> {
    registry
        .scatter_rules
        .iter()
        .filter_map(|rule| {
            let (count, positions) = rule.count(grid);
            let multiplier = rule.pays.get(&count).copied()?;
            log::trace!("scatter {} x{} pays {}x stake", rule.symbol, count, multiplier);
            Some(ScatterWin {
                symbol: rule.symbol,
                count,
                multiplier,
                payout: total_stake.times(multiplier),
                positions,
            })
        })
        .collect()
}
