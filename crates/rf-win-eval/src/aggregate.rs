//! Win aggregation

use serde::{Deserialize, Serialize};

use crate::credits::Credits;
use crate::paylines::WinLine;

/// Totals over a spin's win lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    /// Exact sum of line payouts
    pub total_win: Credits,
    /// Index into the win lines of the highest payout (earliest line on ties)
    pub biggest_win: Option<usize>,
    pub has_wins: bool,
}

/// Sum raw line payouts and locate the biggest line
pub fn aggregate(win_lines: &[WinLine]) -> WinSummary {
    let total_win: Credits = win_lines.iter().map(|w| w.payout).sum();

    let mut biggest_win: Option<usize> = None;
    for (i, line) in win_lines.iter().enumerate() {
        if biggest_win.is_none_or(|b| line.payout > win_lines[b].payout) {
            biggest_win = Some(i);
        }
    }

    WinSummary {
        total_win,
        biggest_win,
        has_wins: !win_lines.is_empty(),
    }
}
