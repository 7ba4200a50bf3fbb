//! Win Tiers — categorization and presentation hints
//!
//! The classifier is not a pure magnitude ranking. In order:
//! 1. a wild expansion always classifies as `wild`
//! 2. a special pattern (default: exactly two premium symbols) as `special-pair`
//! 3. otherwise the highest stake-multiple threshold reached, `small` below all

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::credits::Credits;
use crate::paylines::WinLine;
use crate::symbols::SymbolId;

/// Win tier category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinTierKind {
    Small,
    Medium,
    Large,
    Mega,
    Wild,
    SpecialPair,
}

impl WinTierKind {
    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Mega => "mega",
            Self::Wild => "wild",
            Self::SpecialPair => "special-pair",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Small => "Small Win",
            Self::Medium => "Medium Win",
            Self::Large => "Large Win",
            Self::Mega => "Mega Win",
            Self::Wild => "Expanding Wild",
            Self::SpecialPair => "Premium Pair",
        }
    }

    /// Magnitude tiers are the ones selectable by stake multiple
    pub fn is_magnitude(&self) -> bool {
        matches!(self, Self::Small | Self::Medium | Self::Large | Self::Mega)
    }
}

/// Presentation intensity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Subtle,
    Moderate,
    Strong,
    Extreme,
}

/// Audio cue descriptor: which segment to play and over what window.
/// Returned as data only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioCue {
    pub segment_id: String,
    pub start_ms: u32,
    pub end_ms: u32,
}

impl AudioCue {
    pub fn new(segment_id: impl Into<String>, start_ms: u32, end_ms: u32) -> Self {
        Self {
            segment_id: segment_id.into(),
            start_ms,
            end_ms,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Suggested presentation for a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPresentation {
    /// Animation speed multiplier (1.0 = normal)
    pub animation_speed: f64,
    pub intensity: Intensity,
    pub audio_cue: AudioCue,
}

impl TierPresentation {
    /// Built-in presentation for a tier
    pub fn standard(kind: WinTierKind) -> Self {
        let (animation_speed, intensity, segment, end_ms) = match kind {
            WinTierKind::Small => (1.0, Intensity::Subtle, "win_small", 1200),
            WinTierKind::Medium => (1.2, Intensity::Moderate, "win_medium", 2500),
            WinTierKind::Large => (1.5, Intensity::Strong, "win_large", 4000),
            WinTierKind::Mega => (2.0, Intensity::Extreme, "win_mega", 8000),
            WinTierKind::Wild => (1.3, Intensity::Strong, "wild_expand", 3000),
            WinTierKind::SpecialPair => (1.1, Intensity::Moderate, "premium_pair", 1800),
        };
        Self {
            animation_speed,
            intensity,
            audio_cue: AudioCue::new(segment, 0, end_ms),
        }
    }
}

/// Magnitude threshold: reached when total win ≥ multiplier × stake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThreshold {
    pub multiplier: u32,
    pub tier: WinTierKind,
}

/// A win-line shape that earns its own tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPattern {
    /// `None` means the registry's premium symbol
    #[serde(default)]
    pub symbol: Option<SymbolId>,
    /// Exact run length
    pub count: u8,
}

impl SpecialPattern {
    /// Exactly two premium symbols
    pub fn premium_pair() -> Self {
        Self { symbol: None, count: 2 }
    }

    pub fn matches(&self, win: &WinLine, premium: Option<SymbolId>) -> bool {
        let Some(symbol) = self.symbol.or(premium) else {
            return false;
        };
        win.symbol == symbol && win.count == self.count
    }
}

/// Win tier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinTierConfig {
    /// Ascending thresholds
    pub thresholds: Vec<TierThreshold>,
    /// Presentation overrides; tiers not listed use the built-in one
    #[serde(default)]
    pub presentations: BTreeMap<WinTierKind, TierPresentation>,
}

impl WinTierConfig {
    /// 1× small, 5× medium, 20× large, 50× mega
    pub fn standard() -> Self {
        Self {
            thresholds: vec![
                TierThreshold { multiplier: 1, tier: WinTierKind::Small },
                TierThreshold { multiplier: 5, tier: WinTierKind::Medium },
                TierThreshold { multiplier: 20, tier: WinTierKind::Large },
                TierThreshold { multiplier: 50, tier: WinTierKind::Mega },
            ],
            presentations: BTreeMap::new(),
        }
    }

    pub fn presentation(&self, kind: WinTierKind) -> TierPresentation {
        self.presentations
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| TierPresentation::standard(kind))
    }

    /// Highest threshold met, `Small` when none is
    pub fn magnitude_tier(&self, total_win: Credits, stake: Credits) -> WinTierKind {
        self.thresholds
            .iter()
            .filter(|t| total_win >= stake.times(t.multiplier))
            .max_by_key(|t| t.multiplier)
            .map(|t| t.tier)
            .unwrap_or(WinTierKind::Small)
    }
}

impl Default for WinTierConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Non-fatal conditions noticed while classifying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnostic {
    /// Stake was zero or negative; tier fell back to `small`
    NonPositiveStake,
}

/// Classifier output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinClassification {
    pub tier: WinTierKind,
    /// Total win / stake, 0.0 when the stake is degenerate
    pub win_ratio: f64,
    pub presentation: TierPresentation,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Win classifier bound to a tier configuration
pub struct WinClassifier<'a> {
    config: &'a WinTierConfig,
    patterns: &'a [SpecialPattern],
    premium: Option<SymbolId>,
}

impl<'a> WinClassifier<'a> {
    pub fn new(config: &'a WinTierConfig, patterns: &'a [SpecialPattern], premium: Option<SymbolId>) -> Self {
        Self {
            config,
            patterns,
            premium,
        }
    }

    /// Classify a spin. Never fails.
    pub fn classify(
        &self,
        total_win: Credits,
        stake: Credits,
        win_lines: &[WinLine],
        wild_expansion_occurred: bool,
    ) -> WinClassification {
        if !stake.is_positive() {
            log::warn!("classifying with non-positive stake {stake}; falling back to small");
            return self.build(WinTierKind::Small, 0.0, vec![Diagnostic::NonPositiveStake]);
        }

        let win_ratio = total_win.as_f64() / stake.as_f64();

        let tier = if wild_expansion_occurred {
            WinTierKind::Wild
        } else if win_lines
            .iter()
            .any(|w| self.patterns.iter().any(|p| p.matches(w, self.premium)))
        {
            WinTierKind::SpecialPair
        } else {
            self.config.magnitude_tier(total_win, stake)
        };

        self.build(tier, win_ratio, Vec::new())
    }

    fn build(&self, tier: WinTierKind, win_ratio: f64, diagnostics: Vec<Diagnostic>) -> WinClassification {
        WinClassification {
            tier,
            win_ratio,
            presentation: self.config.presentation(tier),
            diagnostics,
        }
    }
}
