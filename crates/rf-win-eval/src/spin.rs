//! Spin evaluation entry point and its result

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::config::EngineConfig;
use crate::credits::Credits;
use crate::error::{EvalResult, ValidationError};
use crate::expansion::expand_wilds;
use crate::grid::Grid;
use crate::paylines::{WinLine, match_paylines};
use crate::scatter::{ScatterWin, evaluate_scatters};
use crate::win_tiers::{WinClassification, WinClassifier, WinTierKind};

/// Complete, immutable outcome of one spin evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Line wins in payline order
    pub win_lines: Vec<WinLine>,
    /// Exact sum of `win_lines` payouts
    pub total_win: Credits,
    /// Reels that expanded to wild, ascending
    pub expanded_reels: Vec<u8>,
    pub win_tier: WinTierKind,
    /// Tier plus presentation hints and diagnostics
    pub classification: WinClassification,
    /// Index of the highest-paying line
    pub biggest_win: Option<usize>,
    /// Grid the lines were scored on (after expansion)
    pub scored_grid: Grid,
    pub bet_per_line: Credits,
    /// Bet per line × payline count
    pub total_stake: Credits,
    /// Scatter pays on the landed grid. Not included in `total_win`.
    #[serde(default)]
    pub scatter_wins: Vec<ScatterWin>,
}

impl SpinResult {
    pub fn has_wins(&self) -> bool {
        !self.win_lines.is_empty()
    }

    pub fn biggest_win(&self) -> Option<&WinLine> {
        self.biggest_win.and_then(|i| self.win_lines.get(i))
    }

    pub fn scatter_total(&self) -> Credits {
        self.scatter_wins.iter().map(|s| s.payout).sum()
    }

    /// Line wins plus scatter wins
    pub fn total_with_scatters(&self) -> Credits {
        self.total_win + self.scatter_total()
    }
}

/// Evaluate a landed grid.
///
/// `config` of `None` uses the standard game. Pure: identical inputs give
/// identical results and nothing outside the return value is touched.
pub fn evaluate_spin(
    grid: &Grid,
    bet_multiplier: Credits,
    config: Option<&EngineConfig>,
) -> Result<SpinResult, ValidationError> {
    if !bet_multiplier.is_positive() {
        return Err(ValidationError::InvalidBet(format!(
            "{bet_multiplier} must be positive"
        )));
    }
    let config = config.unwrap_or_else(|| EngineConfig::standard_ref());
    let registry = config.registry();
    if payout_ceiling(config, bet_multiplier).is_none() {
        return Err(ValidationError::InvalidBet(format!(
            "{bet_multiplier} is out of range: the largest possible payout does not fit"
        )));
    }

    let expansion = expand_wilds(grid, registry.wild);
    let win_lines = match_paylines(&expansion.grid, config.paylines(), bet_multiplier, registry);
    let summary = aggregate(&win_lines);

    let total_stake = bet_multiplier.times(config.paylines().len() as u32);
    let classification = WinClassifier::new(
        config.tiers(),
        config.special_patterns(),
        registry.premium_symbol(),
    )
    .classify(summary.total_win, total_stake, &win_lines, expansion.occurred());

    let scatter_wins = evaluate_scatters(grid, total_stake, registry);

    log::debug!(
        "spin evaluated: {} line wins, total {}, expanded {:?}, tier {}",
        win_lines.len(),
        summary.total_win,
        expansion.expanded_reels,
        classification.tier.name()
    );

    Ok(SpinResult {
        win_lines,
        total_win: summary.total_win,
        expanded_reels: expansion.expanded_reels,
        win_tier: classification.tier,
        classification,
        biggest_win: summary.biggest_win,
        scored_grid: expansion.grid,
        bet_per_line: bet_multiplier,
        total_stake,
        scatter_wins,
    })
}

/// Largest amount one spin can pay at this bet, `None` if it overflows.
///
/// Every line pays at most the top line pay and every scatter rule pays at
/// most once, so a bet that passes this check can never overflow a payout
/// or a total.
fn payout_ceiling(config: &EngineConfig, bet_per_line: Credits) -> Option<Credits> {
    let lines = u32::try_from(config.paylines().len()).ok()?;
    let registry = config.registry();

    let mut ceiling = bet_per_line
        .checked_times(registry.top_line_pay())?
        .checked_times(lines)?;
    let total_stake = bet_per_line.checked_times(lines)?;
    for rule in &registry.scatter_rules {
        ceiling = ceiling.checked_add(total_stake.checked_times(rule.top_pay())?)?;
    }
    Some(ceiling)
}

/// Evaluator owning its configuration
#[derive(Debug, Clone, Default)]
pub struct SpinEngine {
    config: EngineConfig,
}

impl SpinEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, grid: &Grid, bet_multiplier: Credits) -> Result<SpinResult, ValidationError> {
        evaluate_spin(grid, bet_multiplier, Some(&self.config))
    }

    /// Validate and evaluate a wire request
    pub fn evaluate_request(&self, request: &SpinRequest) -> Result<SpinResult, ValidationError> {
        let (grid, bet) = request.validate()?;
        self.evaluate(&grid, bet)
    }
}

/// Evaluate a wire request against a configuration file, or the standard
/// game when `config_path` is `None`
pub fn evaluate_request_with(request: &SpinRequest, config_path: Option<&Path>) -> EvalResult<SpinResult> {
    let engine = match config_path {
        Some(path) => SpinEngine::new(EngineConfig::from_file(path)?),
        None => SpinEngine::default(),
    };
    Ok(engine.evaluate_request(request)?)
}

/// Wire form of a spin: reel-major symbol names and a float bet per line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRequest {
    pub grid: Vec<Vec<String>>,
    pub bet_multiplier: f64,
}

impl SpinRequest {
    /// Translate into engine types
    pub fn validate(&self) -> Result<(Grid, Credits), ValidationError> {
        let grid = Grid::from_wire(&self.grid)?;
        let bet = Credits::try_from_f64(self.bet_multiplier)?;
        Ok((grid, bet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::symbols::SymbolId::*;

    #[test]
    fn test_losing_spin() {
        let grid = Grid::from_rows([
            [Seven, Bell, Plum, Lemon, Orange],
            [Lemon, Cherry, Bell, Plum, Grapes],
            [Plum, Orange, Cherry, Bell, Lemon],
        ]);
        let result = evaluate_spin(&grid, Credits::from_whole(1), None).unwrap();
        assert!(!result.has_wins());
        assert_eq!(result.total_win, Credits::ZERO);
        assert!(result.expanded_reels.is_empty());
        assert_eq!(result.win_tier, WinTierKind::Small);
        assert_eq!(result.total_stake, Credits::from_whole(10));
        assert!(result.biggest_win().is_none());
    }

    #[test]
    fn test_invalid_bet() {
        let grid = Grid::filled(Cherry);
        assert!(matches!(
            evaluate_spin(&grid, Credits::ZERO, None),
            Err(ValidationError::InvalidBet(_))
        ));
        assert!(evaluate_spin(&grid, Credits::from_minor(-1), None).is_err());
    }

    #[test]
    fn test_request_validation() {
        let engine = SpinEngine::default();
        let request = SpinRequest {
            grid: vec![vec!["Cherry".into(), "Cherry".into(), "Cherry".into()]; 5],
            bet_multiplier: 0.5,
        };
        let result = engine.evaluate_request(&request).unwrap();
        assert_eq!(result.bet_per_line, Credits::from_minor(50));
        assert_eq!(result.win_lines.len(), 10);

        let bad_bet = SpinRequest { bet_multiplier: -2.0, ..request.clone() };
        assert!(matches!(engine.evaluate_request(&bad_bet), Err(ValidationError::InvalidBet(_))));

        let bad_grid = SpinRequest { grid: vec![vec!["Cherry".into(); 3]; 6], ..request };
        assert!(matches!(
            engine.evaluate_request(&bad_grid),
            Err(ValidationError::GridShape { reels: 6, rows: 3 })
        ));
    }

    #[test]
    fn test_bet_too_large_to_pay_is_rejected() {
        // Standard game: 10 lines x 5000 plus scatters 10 x (100 + 20) = 51_200 x bet
        let largest = Credits::from_minor(i64::MAX / 51_200);
        let result = evaluate_spin(&Grid::filled(Wild), largest, None).unwrap();
        let exact: i128 = result.win_lines.iter().map(|w| w.payout.minor() as i128).sum();
        assert_eq!(result.total_win.minor() as i128, exact);
        assert_eq!(exact, largest.minor() as i128 * 50_000);

        let too_large = Credits::from_minor(largest.minor() + 1);
        assert!(matches!(
            evaluate_spin(&Grid::filled(Wild), too_large, None),
            Err(ValidationError::InvalidBet(_))
        ));
        assert!(matches!(
            evaluate_spin(&Grid::filled(Wild), Credits::from_minor(1_000_000_000_000_000), None),
            Err(ValidationError::InvalidBet(_))
        ));
    }

    #[test]
    fn test_request_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cherry.json");
        std::fs::write(&path, r#"{ "line_pays": { "Cherry": { "3": 1 } } }"#).unwrap();

        let request = SpinRequest {
            grid: vec![vec!["Cherry".into(), "Cherry".into(), "Cherry".into()]; 5],
            bet_multiplier: 1.0,
        };
        let result = evaluate_request_with(&request, Some(&path)).unwrap();
        assert!(result.win_lines.is_empty());

        let missing = evaluate_request_with(&request, Some(&dir.path().join("missing.json")));
        assert!(matches!(missing, Err(EvalError::Config(_))));

        let bad = SpinRequest { bet_multiplier: 0.0, ..request };
        assert!(matches!(
            evaluate_request_with(&bad, None),
            Err(EvalError::Validation(ValidationError::InvalidBet(_)))
        ));
    }

    #[test]
    fn test_scatters_reported_separately() {
        let grid = Grid::from_rows([
            [DollarScatter, Bell, DollarScatter, Lemon, DollarScatter],
            [Lemon, Cherry, Bell, Plum, Grapes],
            [Plum, Orange, Cherry, Bell, Lemon],
        ]);
        let result = evaluate_spin(&grid, Credits::from_whole(1), None).unwrap();
        assert_eq!(result.total_win, Credits::ZERO);
        assert_eq!(result.scatter_total(), Credits::from_whole(50));
        assert_eq!(result.total_with_scatters(), Credits::from_whole(50));
    }
}
