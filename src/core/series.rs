//! Monthly value series and the latest-month resolver.

use super::month::Month;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Month-keyed values of a single holding, in base currency.
///
/// A missing key and an explicit `null` both mean "no data for that month".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    values: BTreeMap<Month, Option<f64>>,
}

impl MonthlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, month: Month, value: f64) -> Self {
        self.set(month, Some(value));
        self
    }

    pub fn set(&mut self, month: Month, value: Option<f64>) {
        self.values.insert(month, value);
    }

    pub fn get(&self, month: Month) -> Option<f64> {
        self.values.get(&month).copied().flatten()
    }

    /// Returns the latest month holding a strictly positive value.
    ///
    /// Zero and negative entries count as "not set", same as missing ones.
    pub fn most_recent(&self) -> Option<(Month, f64)> {
        Month::LOOKBACK.iter().find_map(|month| {
            self.get(*month)
                .filter(|value| *value > 0.0)
                .map(|value| (*month, value))
        })
    }
}

impl FromIterator<(Month, Option<f64>)> for MonthlySeries {
    fn from_iter<T: IntoIterator<Item = (Month, Option<f64>)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Month(Month),
    BaseValue,
}

/// Latest positive monthly value and its month, or `fallback` when the
/// series is absent or has none.
pub fn resolve(series: Option<&MonthlySeries>, fallback: f64) -> (ValueSource, f64) {
    series
        .and_then(MonthlySeries::most_recent)
        .map_or((ValueSource::BaseValue, fallback), |(month, value)| {
            (ValueSource::Month(month), value)
        })
}

/// Latest positive monthly value, or `fallback` when the series is absent or has none.
pub fn most_recent_value(series: Option<&MonthlySeries>, fallback: f64) -> f64 {
    resolve(series, fallback).1
}
