//! Engine configuration and jurisdiction documents
//!
//! A configuration is validated once, when it is built or loaded. Spins
//! never re-check it.
//!
//! ## Document format (JSON or YAML)
//!
//! Every field is optional; anything omitted falls back to the standard game.
//!
//! ```yaml
//! name: reduced-seven
//! wild_symbol: Wild
//! min_run: 2
//! premium_symbol: Seven
//! line_pays:
//!   Seven: { 2: 5, 3: 40, 4: 200, 5: 2500 }
//!   Cherry: { 3: 10, 4: 30, 5: 150 }
//! paylines:
//!   - [1, 1, 1, 1, 1]
//!   - [0, 0, 0, 0, 0]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{REELS, ROWS};
use crate::paylines::{Payline, standard_10_paylines};
use crate::registry::{MAX_RUN, PayEntry, SHORTEST_RUN, SymbolRegistry};
use crate::scatter::{ScatterCounting, ScatterRule};
use crate::symbols::SymbolId;
use crate::win_tiers::{SpecialPattern, WinTierConfig};

static STANDARD: LazyLock<EngineConfig> = LazyLock::new(EngineConfig::standard);

/// Everything a spin evaluation reads besides the grid and the bet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    name: String,
    registry: SymbolRegistry,
    paylines: Vec<Payline>,
    tiers: WinTierConfig,
    special_patterns: Vec<SpecialPattern>,
}

impl EngineConfig {
    /// The standard 10-line game
    pub fn standard() -> Self {
        Self {
            name: "standard".into(),
            registry: SymbolRegistry::standard(),
            paylines: standard_10_paylines(),
            tiers: WinTierConfig::standard(),
            special_patterns: vec![SpecialPattern::premium_pair()],
        }
    }

    /// Shared standard configuration
    pub fn standard_ref() -> &'static EngineConfig {
        &STANDARD
    }

    /// Build and validate a configuration
    pub fn new(
        name: impl Into<String>,
        registry: SymbolRegistry,
        paylines: Vec<Payline>,
        tiers: WinTierConfig,
        special_patterns: Vec<SpecialPattern>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            name: name.into(),
            registry,
            paylines,
            tiers,
            special_patterns,
        };
        config.validate()?;
        Ok(config)
    }

    /// Standard game with a different registry
    pub fn with_registry(registry: SymbolRegistry) -> Result<Self, ConfigError> {
        let standard = Self::standard();
        Self::new("custom", registry, standard.paylines, standard.tiers, standard.special_patterns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    pub fn tiers(&self) -> &WinTierConfig {
        &self.tiers
    }

    pub fn special_patterns(&self) -> &[SpecialPattern] {
        &self.special_patterns
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDocument = serde_json::from_str(json)?;
        doc.into_config()
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDocument = serde_yml::from_str(yaml)?;
        doc.into_config()
    }

    /// Load from a file; `.yaml`/`.yml` are YAML, everything else JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let config = if is_yaml {
            Self::from_yaml_str(&text)?
        } else {
            Self::from_json_str(&text)?
        };
        log::info!(
            "loaded engine config '{}' from {} ({} paylines)",
            config.name,
            path.display(),
            config.paylines.len()
        );
        Ok(config)
    }

    /// Internal consistency check
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_paylines()?;
        self.validate_registry()?;
        self.validate_tiers()?;

        for pattern in &self.special_patterns {
            if !(1..=MAX_RUN).contains(&pattern.count) {
                return invalid(format!("special pattern count {} outside 1..=5", pattern.count));
            }
        }
        Ok(())
    }

    fn validate_paylines(&self) -> Result<(), ConfigError> {
        if self.paylines.is_empty() {
            return invalid("no paylines defined");
        }
        let mut seen = HashSet::new();
        for line in &self.paylines {
            if line.number == 0 {
                return invalid("payline numbers start at 1");
            }
            if !seen.insert(line.number) {
                return invalid(format!("duplicate payline number {}", line.number));
            }
            if let Some(row) = line.rows.iter().find(|&&r| r as usize >= ROWS) {
                return invalid(format!("payline {} uses row {} outside 0..=2", line.number, row));
            }
        }
        Ok(())
    }

    fn validate_registry(&self) -> Result<(), ConfigError> {
        let registry = &self.registry;
        if !(SHORTEST_RUN..=MAX_RUN).contains(&registry.min_run) {
            return invalid(format!("min_run {} outside {SHORTEST_RUN}..=5", registry.min_run));
        }

        let scatter_symbols: HashSet<SymbolId> = registry.scatter_rules.iter().map(|r| r.symbol).collect();
        if scatter_symbols.len() != registry.scatter_rules.len() {
            return invalid("duplicate scatter rule");
        }
        if scatter_symbols.contains(&registry.wild) {
            return invalid(format!("wild symbol {} cannot be a scatter", registry.wild));
        }

        for (&symbol, entry) in &registry.line_pays {
            if symbol == registry.wild {
                return invalid(format!("wild symbol {symbol} cannot carry line pays"));
            }
            if scatter_symbols.contains(&symbol) {
                return invalid(format!("scatter symbol {symbol} cannot carry line pays"));
            }
            for (&run, &value) in entry {
                if run < registry.min_run || run > MAX_RUN {
                    return invalid(format!(
                        "{symbol} pays on run {run}, outside {}..=5",
                        registry.min_run
                    ));
                }
                if value == 0 {
                    return invalid(format!("{symbol} x{run} pays zero"));
                }
            }
        }

        for rule in &registry.scatter_rules {
            if let ScatterCounting::Reels { reels } = &rule.counting {
                if let Some(reel) = reels.iter().find(|&&r| r as usize >= REELS) {
                    return invalid(format!("{} counts reel {} outside 0..=4", rule.symbol, reel));
                }
                let distinct: HashSet<u8> = reels.iter().copied().collect();
                if distinct.len() != reels.len() {
                    return invalid(format!("{} lists a counted reel more than once", rule.symbol));
                }
            }
            if rule.pays.iter().any(|(&count, &value)| count == 0 || value == 0) {
                return invalid(format!("{} has a zero scatter count or pay", rule.symbol));
            }
        }

        if let Some(premium) = registry.premium_symbol {
            if registry.line_pays.get(&premium).is_none_or(|e| e.is_empty()) {
                return invalid(format!("premium symbol {premium} has no line pays"));
            }
        }
        Ok(())
    }

    fn validate_tiers(&self) -> Result<(), ConfigError> {
        let thresholds = &self.tiers.thresholds;
        if thresholds.is_empty() {
            return invalid("no win tier thresholds");
        }
        let mut previous = 0;
        for threshold in thresholds {
            if !threshold.tier.is_magnitude() {
                return invalid(format!("{} is not a magnitude tier", threshold.tier.name()));
            }
            if threshold.multiplier <= previous {
                return invalid("tier thresholds must be non-zero and strictly ascending");
            }
            previous = threshold.multiplier;
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn invalid<T>(reason: impl Into<String>) -> Result<T, ConfigError> {
    Err(ConfigError::Invalid(reason.into()))
}

/// Serialized configuration document. Symbol names go through the wire
/// translation table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub line_pays: Option<BTreeMap<String, PayEntry>>,
    #[serde(default)]
    pub scatter_rules: Option<Vec<ScatterRule>>,
    #[serde(default)]
    pub wild_symbol: Option<String>,
    #[serde(default)]
    pub min_run: Option<u8>,
    /// Explicit premium symbol. When `line_pays` is overridden and this is
    /// omitted, the premium symbol is derived from the new pays.
    #[serde(default)]
    pub premium_symbol: Option<String>,
    #[serde(default)]
    pub display_names: BTreeMap<String, String>,
    /// Row per reel for each line; numbered from 1 in document order
    #[serde(default)]
    pub paylines: Option<Vec<Vec<u8>>>,
    #[serde(default)]
    pub tiers: Option<WinTierConfig>,
    #[serde(default)]
    pub special_patterns: Option<Vec<SpecialPattern>>,
}

impl ConfigDocument {
    /// Translate and validate into an [`EngineConfig`]
    pub fn into_config(self) -> Result<EngineConfig, ConfigError> {
        let standard = EngineConfig::standard();
        let mut registry = standard.registry;

        if let Some(line_pays) = self.line_pays {
            registry.line_pays = line_pays
                .into_iter()
                .map(|(name, entry)| Ok((symbol(&name)?, entry)))
                .collect::<Result<_, ConfigError>>()?;
            registry.premium_symbol = None;
        }
        if let Some(rules) = self.scatter_rules {
            registry.scatter_rules = rules;
        }
        if let Some(wild) = self.wild_symbol {
            registry.wild = symbol(&wild)?;
        }
        if let Some(min_run) = self.min_run {
            registry.min_run = min_run;
        }
        if let Some(premium) = self.premium_symbol {
            registry.premium_symbol = Some(symbol(&premium)?);
        }
        for (name, display) in self.display_names {
            registry.display_names.insert(symbol(&name)?, display);
        }

        let paylines = match self.paylines {
            Some(lines) => lines
                .into_iter()
                .enumerate()
                .map(|(i, rows)| {
                    let number = u8::try_from(i + 1)
                        .map_err(|_| ConfigError::Invalid("more than 255 paylines".into()))?;
                    let rows: [u8; REELS] = rows.as_slice().try_into().map_err(|_| {
                        ConfigError::Invalid(format!(
                            "payline {number} has {} coordinates, expected {REELS}",
                            rows.len()
                        ))
                    })?;
                    Ok(Payline::new(number, rows))
                })
                .collect::<Result<Vec<_>, ConfigError>>()?,
            None => standard.paylines,
        };

        EngineConfig::new(
            self.name.unwrap_or_else(|| "custom".into()),
            registry,
            paylines,
            self.tiers.unwrap_or(standard.tiers),
            self.special_patterns.unwrap_or(standard.special_patterns),
        )
    }
}

fn symbol(name: &str) -> Result<SymbolId, ConfigError> {
    SymbolId::from_wire(name).map_err(|e| ConfigError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::win_tiers::{TierThreshold, WinTierKind};

    #[test]
    fn test_standard_is_valid() {
        let config = EngineConfig::standard();
        assert!(config.validate().is_ok());
        assert_eq!(config.paylines().len(), 10);
        assert_eq!(EngineConfig::standard_ref(), &config);
    }

    #[test]
    fn test_empty_document_is_standard() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config.registry(), EngineConfig::standard().registry());
        assert_eq!(config.paylines(), EngineConfig::standard().paylines());
        assert_eq!(config.name(), "custom");
    }

    #[test]
    fn test_json_override() {
        let json = r#"{
            "name": "cherry-only",
            "line_pays": { "cherry.png": { "3": 1 } },
            "paylines": [[1, 1, 1, 1, 1], [0, 0, 0, 0, 0]],
            "display_names": { "Cherry": "Red Cherry" }
        }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.name(), "cherry-only");
        assert_eq!(config.registry().line_pay(SymbolId::Cherry, 3), Some(1));
        assert_eq!(config.registry().line_pay(SymbolId::Seven, 5), None);
        assert_eq!(config.registry().premium_symbol(), Some(SymbolId::Cherry));
        assert_eq!(config.registry().display_name(SymbolId::Cherry), "Red Cherry");
        assert_eq!(config.paylines()[1], Payline::straight(2, 0));
    }

    #[test]
    fn test_yaml_override() {
        let yaml = r#"
name: reduced-seven
premium_symbol: Seven
line_pays:
  Seven: { 2: 5, 3: 40, 4: 200, 5: 2500 }
  Bell: { 3: 20 }
tiers:
  thresholds:
    - { multiplier: 2, tier: small }
    - { multiplier: 10, tier: medium }
    - { multiplier: 100, tier: mega }
"#;
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.registry().line_pay(SymbolId::Seven, 5), Some(2500));
        assert_eq!(config.tiers().thresholds.len(), 3);
        assert_eq!(config.tiers().thresholds[2].tier, WinTierKind::Mega);
    }

    #[test]
    fn test_payline_with_wrong_coordinate_count() {
        let err = EngineConfig::from_json_str(r#"{ "paylines": [[1, 1, 1, 1]] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("4 coordinates")));
    }

    #[test]
    fn test_payline_row_out_of_range() {
        let err = EngineConfig::from_json_str(r#"{ "paylines": [[1, 1, 3, 1, 1]] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_symbol_in_pays() {
        let err = EngineConfig::from_json_str(r#"{ "line_pays": { "Kiwi": { "3": 5 } } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("Kiwi")));
    }

    #[test]
    fn test_wild_with_line_pays_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "line_pays": { "Wild": { "5": 100 } } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_run_below_min_rejected() {
        let json = r#"{ "min_run": 3, "line_pays": { "Seven": { "2": 10 } } }"#;
        assert!(EngineConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_min_run_below_two_rejected() {
        let json = r#"{ "min_run": 1, "line_pays": { "Seven": { "2": 10 } } }"#;
        let err = EngineConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("min_run 1")));
    }

    #[test]
    fn test_scatter_reel_listed_twice_rejected() {
        let json = r#"{
            "scatter_rules": [{
                "symbol": "StarScatter",
                "counting": { "type": "reels", "reels": [0, 0, 0] },
                "pays": { "3": 20 }
            }]
        }"#;
        let err = EngineConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("more than once")));

        let distinct = json.replace("[0, 0, 0]", "[0, 2, 4]");
        let config = EngineConfig::from_json_str(&distinct).unwrap();
        assert_eq!(config.registry().scatter_rules.len(), 1);
    }

    #[test]
    fn test_premium_without_pays_rejected() {
        let json = r#"{ "premium_symbol": "Bell", "line_pays": { "Seven": { "3": 10 } } }"#;
        assert!(EngineConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_scatter_as_wild_rejected() {
        assert!(EngineConfig::from_json_str(r#"{ "wild_symbol": "StarScatter" }"#).is_err());
    }

    #[test]
    fn test_tiers_must_ascend() {
        let mut tiers = WinTierConfig::standard();
        tiers.thresholds.swap(1, 2);
        let standard = EngineConfig::standard();
        let result = EngineConfig::new(
            "bad",
            standard.registry().clone(),
            standard.paylines().to_vec(),
            tiers,
            Vec::new(),
        );
        assert!(result.is_err());

        let mut tiers = WinTierConfig::standard();
        tiers.thresholds.push(TierThreshold { multiplier: 100, tier: WinTierKind::Wild });
        let result = EngineConfig::new("bad", standard.registry().clone(), standard.paylines().to_vec(), tiers, Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_payline_numbers_rejected() {
        let standard = EngineConfig::standard();
        let lines = vec![Payline::straight(1, 1), Payline::straight(1, 0)];
        let result = EngineConfig::new(
            "dup",
            standard.registry().clone(),
            lines,
            WinTierConfig::standard(),
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(EngineConfig::from_json_str("{ nope"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("variant.yml");
        std::fs::write(&yaml_path, "name: from-yaml\nmin_run: 2\n").unwrap();
        assert_eq!(EngineConfig::from_file(&yaml_path).unwrap().name(), "from-yaml");

        let json_path = dir.path().join("variant.json");
        std::fs::write(&json_path, r#"{ "name": "from-json" }"#).unwrap();
        assert_eq!(EngineConfig::from_file(&json_path).unwrap().name(), "from-json");

        assert!(matches!(
            EngineConfig::from_file(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
