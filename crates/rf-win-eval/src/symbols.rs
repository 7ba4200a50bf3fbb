//! Symbol identities and the wire translation table
//!
//! Collaborating code names symbols with loose, filename-style strings
//! (`"symbols/cherry.png"`). Those strings are translated exactly once, here;
//! everything past this module works with the closed [`SymbolId`] enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Regular line-paying symbol
    Regular,
    /// Substitutes for regular symbols and expands on the middle reels
    Wild,
    /// Pays by count regardless of line
    Scatter,
}

/// Every symbol the engine knows about.
///
/// Declaration order is the registry enumeration order and settles payout
/// ties between candidates on the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SymbolId {
    Seven = 0,
    Watermelon = 1,
    Grapes = 2,
    Bell = 3,
    Plum = 4,
    Orange = 5,
    Cherry = 6,
    Lemon = 7,
    DollarScatter = 8,
    StarScatter = 9,
    Wild = 10,
}

impl SymbolId {
    /// All symbols in enumeration order
    pub const ALL: [SymbolId; 11] = [
        SymbolId::Seven,
        SymbolId::Watermelon,
        SymbolId::Grapes,
        SymbolId::Bell,
        SymbolId::Plum,
        SymbolId::Orange,
        SymbolId::Cherry,
        SymbolId::Lemon,
        SymbolId::DollarScatter,
        SymbolId::StarScatter,
        SymbolId::Wild,
    ];

    /// Canonical wire name (also the serde representation)
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Seven => "Seven",
            Self::Watermelon => "Watermelon",
            Self::Grapes => "Grapes",
            Self::Bell => "Bell",
            Self::Plum => "Plum",
            Self::Orange => "Orange",
            Self::Cherry => "Cherry",
            Self::Lemon => "Lemon",
            Self::DollarScatter => "DollarScatter",
            Self::StarScatter => "StarScatter",
            Self::Wild => "Wild",
        }
    }

    /// Default display name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::DollarScatter => "Dollar Scatter",
            Self::StarScatter => "Star Scatter",
            other => other.wire_name(),
        }
    }

    /// Built-in classification
    pub fn kind(self) -> SymbolKind {
        match self {
            Self::Wild => SymbolKind::Wild,
            Self::DollarScatter | Self::StarScatter => SymbolKind::Scatter,
            _ => SymbolKind::Regular,
        }
    }

    /// Position in enumeration order
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Translate a loosely-typed wire id.
    ///
    /// Accepts `"Cherry"`, `"cherry"`, `"cherry.png"`, `"symbols/Cherry.png"`,
    /// `"dollar_scatter"`, `"dollar-scatter"`.
    pub fn from_wire(raw: &str) -> Result<Self, ValidationError> {
        let stem = raw
            .trim()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        let stem = match stem.rfind('.') {
            Some(dot) if dot > 0 => &stem[..dot],
            _ => stem,
        };
        let key: String = stem
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|s| s.wire_name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| ValidationError::UnknownSymbol(raw.to_string()))
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SymbolId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s)
    }
}

impl Serialize for SymbolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for SymbolId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_wire(&raw).map_err(serde::de::Error::custom)
    }
}
