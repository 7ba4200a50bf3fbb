//! Currency amounts in integer minor units
//!
//! Every payout is `base multiplier × bet per line`, both integral, so sums
//! over any number of lines are exact. Rounding can only happen at the wire
//! boundary, once, when a float bet is converted in.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minor units per whole credit (two decimal places)
pub const MINOR_UNITS: i64 = 100;

/// Tolerance when checking that a float bet lands on a minor unit
const MINOR_UNIT_EPSILON: f64 = 1e-6;

/// Currency amount stored as minor units (1 credit = 100 minor units)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credits(i64);

impl Credits {
    pub const ZERO: Credits = Credits(0);

    /// From raw minor units
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// From whole credits
    pub const fn from_whole(whole: i64) -> Self {
        Self(whole * MINOR_UNITS)
    }

    /// Convert a wire bet into minor units.
    ///
    /// Rejects NaN, infinities, non-positive values and values that are not
    /// an exact number of minor units.
    pub fn try_from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidBet(format!("{value} is not finite")));
        }
        if value <= 0.0 {
            return Err(ValidationError::InvalidBet(format!("{value} must be positive")));
        }

        let scaled = value * MINOR_UNITS as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > MINOR_UNIT_EPSILON {
            return Err(ValidationError::InvalidBet(format!(
                "{value} is finer than one minor unit"
            )));
        }
        if rounded > i64::MAX as f64 {
            return Err(ValidationError::InvalidBet(format!("{value} is out of range")));
        }

        Ok(Self(rounded as i64))
    }

    /// Raw minor units
    pub const fn minor(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Multiply by an integral paytable or threshold factor
    pub fn times(self, factor: u32) -> Self {
        Self(self.0.saturating_mul(factor as i64))
    }

    /// `None` when the product does not fit
    pub fn checked_times(self, factor: u32) -> Option<Self> {
        self.0.checked_mul(factor as i64).map(Self)
    }

    pub fn checked_add(self, rhs: Credits) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Lossy view for ratios and display
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / MINOR_UNITS as f64
    }
}

impl Add for Credits {
    type Output = Credits;

    fn add(self, rhs: Credits) -> Credits {
        Credits(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, rhs: Credits) {
        *self = *self + rhs;
    }
}

impl Sum for Credits {
    fn sum<I: Iterator<Item = Credits>>(iter: I) -> Credits {
        iter.fold(Credits::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Credits> for Credits {
    fn sum<I: Iterator<Item = &'a Credits>>(iter: I) -> Credits {
        iter.copied().sum()
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = MINOR_UNITS as u64;
        write!(f, "{}{}.{:02}", sign, abs / units, abs % units)
    }
}
