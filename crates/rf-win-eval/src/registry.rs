//! Symbol & paytable registry
//!
//! Read-only during a spin. A jurisdiction variant is a whole new registry
//! (usually loaded through [`crate::config::EngineConfig`]), never an edit
//! of a live one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scatter::ScatterRule;
use crate::symbols::{SymbolId, SymbolKind};

/// Longest possible run on a 5-reel line
pub const MAX_RUN: u8 = 5;

/// Default minimum run length for a line win
pub const DEFAULT_MIN_RUN: u8 = 2;

/// Shortest run any configuration may pay
pub const SHORTEST_RUN: u8 = 2;

/// Run length → base multiplier for one symbol
pub type PayEntry = BTreeMap<u8, u32>;

/// Symbol identities, line pays, scatter pays and wild designation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRegistry {
    /// Display name overrides; symbols not listed use their built-in name
    #[serde(default)]
    pub display_names: BTreeMap<SymbolId, String>,
    /// Line pays in bet-per-line multiples
    pub line_pays: BTreeMap<SymbolId, PayEntry>,
    /// Scatter pays in total-stake multiples
    #[serde(default)]
    pub scatter_rules: Vec<ScatterRule>,
    /// Substituting symbol
    pub wild: SymbolId,
    /// Shortest run that can pay
    pub min_run: u8,
    /// Symbol an all-wild line pays as. `None` derives it from the paytable.
    #[serde(default)]
    pub premium_symbol: Option<SymbolId>,
}

impl SymbolRegistry {
    /// The standard 10-line paytable
    pub fn standard() -> Self {
        let fruit = || pays(&[(3, 10), (4, 30), (5, 150)]);

        let mut line_pays = BTreeMap::new();
        line_pays.insert(SymbolId::Seven, pays(&[(2, 10), (3, 50), (4, 250), (5, 5000)]));
        line_pays.insert(SymbolId::Watermelon, pays(&[(3, 40), (4, 120), (5, 700)]));
        line_pays.insert(SymbolId::Grapes, pays(&[(3, 40), (4, 120), (5, 700)]));
        line_pays.insert(SymbolId::Bell, pays(&[(3, 20), (4, 40), (5, 200)]));
        line_pays.insert(SymbolId::Plum, fruit());
        line_pays.insert(SymbolId::Orange, fruit());
        line_pays.insert(SymbolId::Cherry, fruit());
        line_pays.insert(SymbolId::Lemon, fruit());

        Self {
            display_names: BTreeMap::new(),
            line_pays,
            scatter_rules: ScatterRule::standard(),
            wild: SymbolId::Wild,
            min_run: DEFAULT_MIN_RUN,
            premium_symbol: Some(SymbolId::Seven),
        }
    }

    /// A registry with only the given line pays, wild = `Wild`, no scatters,
    /// premium derived from the pays
    pub fn with_line_pays(line_pays: BTreeMap<SymbolId, PayEntry>) -> Self {
        Self {
            display_names: BTreeMap::new(),
            line_pays,
            scatter_rules: Vec::new(),
            wild: SymbolId::Wild,
            min_run: DEFAULT_MIN_RUN,
            premium_symbol: None,
        }
    }

    /// Display name for a symbol
    pub fn display_name(&self, symbol: SymbolId) -> &str {
        self.display_names
            .get(&symbol)
            .map(String::as_str)
            .unwrap_or_else(|| symbol.display_name())
    }

    /// Symbol → display name for every known symbol, in enumeration order
    pub fn display_map(&self) -> Vec<(SymbolId, &str)> {
        SymbolId::ALL
            .iter()
            .map(|&s| (s, self.display_name(s)))
            .collect()
    }

    /// Base multiplier for an exact (symbol, run length) pair
    pub fn line_pay(&self, symbol: SymbolId, run: u8) -> Option<u32> {
        self.line_pays.get(&symbol)?.get(&run).copied()
    }

    /// Effective classification under this registry
    pub fn kind(&self, symbol: SymbolId) -> SymbolKind {
        if symbol == self.wild {
            SymbolKind::Wild
        } else if self.scatter_rules.iter().any(|r| r.symbol == symbol) {
            SymbolKind::Scatter
        } else {
            symbol.kind()
        }
    }

    pub fn is_wild(&self, symbol: SymbolId) -> bool {
        symbol == self.wild
    }

    /// Symbol an all-wild line is scored as.
    ///
    /// Explicit configuration wins. Otherwise the symbol holding the single
    /// highest pay value, ties going to enumeration order. `None` when no
    /// line pays exist.
    pub fn premium_symbol(&self) -> Option<SymbolId> {
        if self.premium_symbol.is_some() {
            return self.premium_symbol;
        }

        let mut best: Option<(SymbolId, u32)> = None;
        for (&symbol, entry) in &self.line_pays {
            if symbol == self.wild {
                continue;
            }
            let Some(&top) = entry.values().max() else {
                continue;
            };
            // BTreeMap iterates in enumeration order, so strict > keeps the earliest
            if best.is_none_or(|(_, value)| top > value) {
                best = Some((symbol, top));
            }
        }
        best.map(|(symbol, _)| symbol)
    }

    /// Highest line pay configured anywhere
    pub fn top_line_pay(&self) -> u32 {
        self.line_pays
            .values()
            .flat_map(|entry| entry.values().copied())
            .max()
            .unwrap_or(0)
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Build a pay entry from `(run, multiplier)` pairs
pub fn pays(entries: &[(u8, u32)]) -> PayEntry {
    entries.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_pays() {
        let registry = SymbolRegistry::standard();
        assert_eq!(registry.line_pay(SymbolId::Seven, 2), Some(10));
        assert_eq!(registry.line_pay(SymbolId::Seven, 5), Some(5000));
        assert_eq!(registry.line_pay(SymbolId::Cherry, 2), None);
        assert_eq!(registry.line_pay(SymbolId::Cherry, 3), Some(10));
        assert_eq!(registry.line_pay(SymbolId::Wild, 5), None);
        assert_eq!(registry.min_run, 2);
        assert_eq!(registry.wild, SymbolId::Wild);
    }

    #[test]
    fn test_premium_explicit() {
        let registry = SymbolRegistry::standard();
        assert_eq!(registry.premium_symbol(), Some(SymbolId::Seven));
    }

    #[test]
    fn test_premium_derived_from_top_pay() {
        let mut line_pays = BTreeMap::new();
        line_pays.insert(SymbolId::Lemon, pays(&[(3, 10), (5, 900)]));
        line_pays.insert(SymbolId::Bell, pays(&[(3, 20), (5, 200)]));
        let registry = SymbolRegistry::with_line_pays(line_pays);
        assert_eq!(registry.premium_symbol(), Some(SymbolId::Lemon));
    }

    #[test]
    fn test_premium_tie_uses_enumeration_order() {
        let mut line_pays = BTreeMap::new();
        line_pays.insert(SymbolId::Grapes, pays(&[(5, 700)]));
        line_pays.insert(SymbolId::Watermelon, pays(&[(5, 700)]));
        let registry = SymbolRegistry::with_line_pays(line_pays);
        assert_eq!(registry.premium_symbol(), Some(SymbolId::Watermelon));
    }

    #[test]
    fn test_premium_none_without_pays() {
        let registry = SymbolRegistry::with_line_pays(BTreeMap::new());
        assert_eq!(registry.premium_symbol(), None);
    }

    #[test]
    fn test_display_names() {
        let mut registry = SymbolRegistry::standard();
        assert_eq!(registry.display_name(SymbolId::DollarScatter), "Dollar Scatter");
        registry
            .display_names
            .insert(SymbolId::Seven, "Lucky 7".into());
        assert_eq!(registry.display_name(SymbolId::Seven), "Lucky 7");
        assert_eq!(registry.display_map().len(), SymbolId::ALL.len());
    }

    #[test]
    fn test_effective_kind() {
        let registry = SymbolRegistry::standard();
        assert_eq!(registry.kind(SymbolId::StarScatter), SymbolKind::Scatter);
        assert_eq!(registry.kind(SymbolId::Wild), SymbolKind::Wild);
        assert_eq!(registry.kind(SymbolId::Bell), SymbolKind::Regular);
    }
}
