//! # rf-win-eval — Win Evaluation Engine
//!
//! Server-side scoring for a 5-reel, 3-row, 10-line slot. Given a landed
//! grid it expands wilds, matches paylines, totals the wins and classifies
//! the result into a presentation tier.
//!
//! The engine is a pure function of (grid, bet, configuration). It does not
//! generate grids, touch balances, or play anything.
//!
//! ## Architecture
//!
//! ```text
//! Grid (landed)
//!     │
//!     ├── expand_wilds       (reels 2–4 → all wild, from the landed grid)
//!     ├── match_paylines     (10 lines, best payout per line)
//!     ├── aggregate          (exact total, biggest line)
//!     └── WinClassifier      (wild → special pair → magnitude)
//!           │
//!           v
//!     SpinResult
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use rf_win_eval::{Credits, Grid, SymbolId::*, evaluate_spin};
//!
//! let grid = Grid::from_rows([
//!     [Bell, Plum, Orange, Lemon, Grapes],
//!     [Cherry, Cherry, Cherry, Lemon, Lemon],
//!     [Orange, Lemon, Grapes, Bell, Plum],
//! ]);
//! let result = evaluate_spin(&grid, Credits::from_whole(1), None).unwrap();
//! assert_eq!(result.win_lines.len(), 1);
//! assert_eq!(result.total_win, Credits::from_whole(10));
//! ```

pub mod aggregate;
pub mod config;
pub mod credits;
pub mod error;
pub mod expansion;
pub mod grid;
pub mod paylines;
pub mod presentation;
pub mod registry;
pub mod scatter;
pub mod spin;
pub mod stats;
pub mod symbols;
pub mod win_tiers;

pub use aggregate::*;
pub use config::*;
pub use credits::*;
pub use error::*;
pub use expansion::*;
pub use grid::*;
pub use paylines::*;
pub use presentation::*;
pub use registry::*;
pub use scatter::*;
pub use spin::*;
pub use stats::*;
pub use symbols::*;
pub use win_tiers::*;
