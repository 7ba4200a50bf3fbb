//! Session statistics over evaluated spins
//!
//! Fed by the caller with results for grids it produced; no randomness here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::credits::Credits;
use crate::spin::SpinResult;
use crate::win_tiers::WinTierKind;

/// Running totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_staked: Credits,
    /// Line wins plus scatter wins
    pub total_paid: Credits,
    pub winning_spins: u64,
    pub max_win: Credits,
    /// Sum of squared spin payouts, in whole credits squared
    sum_squared_payouts: f64,
    /// Payout per combination key (`"Cherry x3"`, `"DollarScatter x3 (Scatter)"`)
    pub contributions: BTreeMap<String, Credits>,
    pub tier_counts: BTreeMap<WinTierKind, u64>,
}

/// One row of the contribution breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub combo: String,
    pub paid: Credits,
    /// Share of total stake, in percent
    pub rtp_percent: f64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one spin in
    pub fn record(&mut self, result: &SpinResult) {
        let paid = result.total_with_scatters();

        self.total_spins += 1;
        self.total_staked += result.total_stake;
        self.total_paid += paid;
        if paid.is_positive() {
            self.winning_spins += 1;
        }
        if paid > self.max_win {
            self.max_win = paid;
        }
        self.sum_squared_payouts += paid.as_f64() * paid.as_f64();

        for line in &result.win_lines {
            *self.contributions.entry(line.combo_key()).or_default() += line.payout;
        }
        for scatter in &result.scatter_wins {
            *self.contributions.entry(scatter.combo_key()).or_default() += scatter.payout;
        }
        *self.tier_counts.entry(result.win_tier).or_default() += 1;
    }

    /// Return to player, percent of stake
    pub fn rtp(&self) -> f64 {
        if self.total_staked.is_positive() {
            self.total_paid.as_f64() / self.total_staked.as_f64() * 100.0
        } else {
            0.0
        }
    }

    /// Percent of spins that paid anything
    pub fn hit_frequency(&self) -> f64 {
        if self.total_spins > 0 {
            self.winning_spins as f64 / self.total_spins as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Population variance of the per-spin payout (credits²)
    pub fn variance(&self) -> f64 {
        if self.total_spins == 0 {
            return 0.0;
        }
        let n = self.total_spins as f64;
        let mean = self.total_paid.as_f64() / n;
        (self.sum_squared_payouts / n - mean * mean).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Average payout of the spins that won
    pub fn average_win(&self) -> f64 {
        if self.winning_spins > 0 {
            self.total_paid.as_f64() / self.winning_spins as f64
        } else {
            0.0
        }
    }

    /// Contributions sorted by amount paid, largest first
    pub fn breakdown(&self) -> Vec<Contribution> {
        let staked = self.total_staked.as_f64();
        let mut rows: Vec<Contribution> = self
            .contributions
            .iter()
            .map(|(combo, &paid)| Contribution {
                combo: combo.clone(),
                paid,
                rtp_percent: if staked > 0.0 { paid.as_f64() / staked * 100.0 } else { 0.0 },
            })
            .collect();
        rows.sort_by(|a, b| b.paid.cmp(&a.paid).then_with(|| a.combo.cmp(&b.combo)));
        rows
    }

    /// Merge another accumulator (e.g. from a parallel batch)
    pub fn merge(&mut self, other: &SessionStats) {
        self.total_spins += other.total_spins;
        self.total_staked += other.total_staked;
        self.total_paid += other.total_paid;
        self.winning_spins += other.winning_spins;
        self.max_win = self.max_win.max(other.max_win);
        self.sum_squared_payouts += other.sum_squared_payouts;
        for (combo, &paid) in &other.contributions {
            *self.contributions.entry(combo.clone()).or_default() += paid;
        }
        for (&tier, &count) in &other.tier_counts {
            *self.tier_counts.entry(tier).or_default() += count;
        }
    }
}
