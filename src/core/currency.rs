//! Fixed-ratio conversion between base and display currency.

use super::holding::AssetClass;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Default base→display ratio (USD→SAR peg).
pub const DEFAULT_MULTIPLIER: f64 = 3.75;

/// Base→display multipliers per asset class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    #[serde(default = "default_multiplier")]
    pub equity_bond_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub alternative_multiplier: f64,
}

fn default_multiplier() -> f64 {
    DEFAULT_MULTIPLIER
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            equity_bond_multiplier: DEFAULT_MULTIPLIER,
            alternative_multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl Multipliers {
    /// Multiplier for the given class. Cash is already in display currency.
    pub fn for_class(&self, class: AssetClass) -> Option<f64> {
        match class {
            AssetClass::Equity | AssetClass::Bond => Some(self.equity_bond_multiplier),
            AssetClass::Alternative => Some(self.alternative_multiplier),
            AssetClass::Cash => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.equity_bond_multiplier, self.alternative_multiplier]
            .iter()
            .all(|m| m.is_finite() && *m > 0.0)
    }
}

pub fn to_display(base_amount: f64, multiplier: f64) -> f64 {
    base_amount * multiplier
}

pub fn to_base(display_amount: f64, multiplier: f64) -> f64 {
    display_amount / multiplier
}

/// Rounds to 2 decimals, half away from zero.
///
/// Only applied where an amount is shown or persisted, never between conversions.
pub fn round_currency(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
