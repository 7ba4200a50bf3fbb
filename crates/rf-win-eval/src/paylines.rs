//! Payline definitions and line matching

use serde::{Deserialize, Serialize};

use crate::credits::Credits;
use crate::grid::{Grid, Position, REELS};
use crate::registry::SymbolRegistry;
use crate::symbols::SymbolId;

/// A fixed scoring line: one row per reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payline {
    /// 1-based line number
    pub number: u8,
    /// Row for each reel (e.g. `[1, 0, 0, 0, 1]`)
    pub rows: [u8; REELS],
}

impl Payline {
    pub const fn new(number: u8, rows: [u8; REELS]) -> Self {
        Self { number, rows }
    }

    /// Same row across all reels
    pub const fn straight(number: u8, row: u8) -> Self {
        Self::new(number, [row; REELS])
    }

    /// Coordinates in reel order
    pub fn positions(&self) -> [Position; REELS] {
        let mut positions = [Position::new(0, 0); REELS];
        for (reel, &row) in self.rows.iter().enumerate() {
            positions[reel] = Position::new(reel as u8, row);
        }
        positions
    }

    /// Symbols along the line in reel order
    pub fn symbols(&self, grid: &Grid) -> [SymbolId; REELS] {
        self.positions().map(|p| grid.get(p))
    }
}

/// Standard 10 paylines for a 5×3 grid
pub fn standard_10_paylines() -> Vec<Payline> {
    vec![
        // Straight lines
        Payline::straight(1, 1), // Middle
        Payline::straight(2, 0), // Top
        Payline::straight(3, 2), // Bottom
        // V shapes
        Payline::new(4, [0, 1, 2, 1, 0]),
        Payline::new(5, [2, 1, 0, 1, 2]),
        // Zigzag
        Payline::new(6, [0, 0, 1, 2, 2]),
        Payline::new(7, [2, 2, 1, 0, 0]),
        // Troughs
        Payline::new(8, [1, 2, 2, 2, 1]),
        Payline::new(9, [1, 0, 0, 0, 1]),
        Payline::new(10, [0, 1, 1, 1, 0]),
    ]
}

/// A winning line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    /// 1-based payline number
    pub line: u8,
    /// Base symbol the run paid as
    pub symbol: SymbolId,
    /// Run length from reel 1
    pub count: u8,
    /// Paytable multiplier for (symbol, count)
    pub multiplier: u32,
    /// `multiplier × bet per line`
    pub payout: Credits,
    /// First `count` coordinates of the line
    pub positions: Vec<Position>,
    /// Matched coordinates that held a wild
    pub wild_positions: Vec<Position>,
}

impl WinLine {
    /// Contribution key, e.g. `"Cherry x3"`
    pub fn combo_key(&self) -> String {
        format!("{} x{}", self.symbol, self.count)
    }
}

/// Left-anchored run of `base` (or wild) along a line
fn run_length(symbols: &[SymbolId; REELS], base: SymbolId, wild: SymbolId) -> u8 {
    symbols
        .iter()
        .take_while(|&&s| s == base || s == wild)
        .count() as u8
}

/// Base symbols worth testing on a line, in enumeration order.
///
/// An all-wild line has no base symbol of its own and is scored as the
/// premium symbol, when the registry has one.
fn candidates(symbols: &[SymbolId; REELS], registry: &SymbolRegistry) -> Vec<SymbolId> {
    let mut found: Vec<SymbolId> = symbols
        .iter()
        .copied()
        .filter(|&s| !registry.is_wild(s))
        .collect();
    found.sort();
    found.dedup();

    if found.is_empty() {
        registry.premium_symbol().into_iter().collect()
    } else {
        found
    }
}

/// Evaluate one payline. Returns the best-paying win, if any.
///
/// The winner is the candidate with the highest payout, not the longest
/// run. Equal payouts go to the earlier symbol in enumeration order.
pub fn evaluate_line(
    grid: &Grid,
    payline: &Payline,
    bet_per_line: Credits,
    registry: &SymbolRegistry,
) -> Option<WinLine> {
    let symbols = payline.symbols(grid);
    let wild = registry.wild;

    let mut best: Option<(SymbolId, u8, u32)> = None;
    for base in candidates(&symbols, registry) {
        let run = run_length(&symbols, base, wild);
        if run < registry.min_run {
            continue;
        }
        let Some(multiplier) = registry.line_pay(base, run) else {
            continue;
        };
        log::trace!("line {}: {} x{} pays {}", payline.number, base, run, multiplier);

        if best.is_none_or(|(_, _, top)| multiplier > top) {
            best = Some((base, run, multiplier));
        }
    }

    let (symbol, count, multiplier) = best?;
    let positions: Vec<Position> = payline.positions()[..count as usize].to_vec();
    let wild_positions = positions
        .iter()
        .copied()
        .filter(|&p| grid.get(p) == wild)
        .collect();

    Some(WinLine {
        line: payline.number,
        symbol,
        count,
        multiplier,
        payout: bet_per_line.times(multiplier),
        positions,
        wild_positions,
    })
}

/// Evaluate every payline in order. Each line yields at most one win and
/// no line short-circuits the rest.
pub fn match_paylines(
    grid: &Grid,
    paylines: &[Payline],
    bet_per_line: Credits,
    registry: &SymbolRegistry,
) -> Vec<WinLine> {
    paylines
        .iter()
        .filter_map(|line| evaluate_line(grid, line, bet_per_line, registry))
        .collect()
}
