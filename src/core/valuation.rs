//! Aggregates holdings and cash records into per-class and grand totals.
use super::currency::{Multipliers, to_display};
use super::error::MalformedRecord;
use super::holding::{AssetClass, CashRecord, Holding};
use super::series::{self, MonthlySeries};
use std::collections::{BTreeMap, HashMap};

pub use super::series::ValueSource;

/// The resolved and converted value of a single holding.
#[derive(Debug, Clone)]
pub struct HoldingValue {
    pub name: String,
    pub asset_class: AssetClass,
    pub source: ValueSource,
    pub base_amount: f64,
    pub display_value: f64,
    /// Share of the holding's class total, in percent.
    pub class_weight: Option<f64>,
}

/// Totals in display currency. Amounts are unrounded.
#[derive(Debug, Clone)]
pub struct Valuation {
    pub per_class_total: BTreeMap<AssetClass, f64>,
    pub grand_total: f64,
    pub holdings: Vec<HoldingValue>,
    pub skipped: Vec<MalformedRecord>,
    pub cash_record_count: usize,
}

impl Valuation {
    pub fn class_total(&self, class: AssetClass) -> f64 {
        self.per_class_total.get(&class).copied().unwrap_or(0.0)
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Net sum of cash movements.
pub fn net_cash(records: &[CashRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Values every holding and sums the results per asset class.
///
/// Each non-cash holding takes its latest positive monthly value, falling back
/// to its base value, converted with its class multiplier. Cash comes from the
/// net of `cash_records` as-is; cash-classed holdings are not valued
/// individually. Holdings without a usable base value are skipped and listed
/// in [`Valuation::skipped`].
pub fn aggregate(
    holdings: &[Holding],
    series_by_name: &HashMap<String, MonthlySeries>,
    cash_records: &[CashRecord],
    multipliers: &Multipliers,
) -> Valuation {
    let mut per_class_total: BTreeMap<AssetClass, f64> =
        AssetClass::ALL.iter().map(|c| (*c, 0.0)).collect();
    let mut values = Vec::new();
    let mut skipped = Vec::new();

    for holding in holdings {
        let Some(multiplier) = multipliers.for_class(holding.asset_class) else {
            continue;
        };

        let base_value = match holding.usable_base_value() {
            Ok(v) => v,
            Err(reason) => {
                skipped.push(MalformedRecord {
                    name: holding.name.clone(),
                    reason,
                });
                continue;
            }
        };

        let (source, base_amount) = series::resolve(series_by_name.get(&holding.name), base_value);

        let display_value = to_display(base_amount, multiplier);
        *per_class_total.entry(holding.asset_class).or_insert(0.0) += display_value;

        values.push(HoldingValue {
            name: holding.name.clone(),
            asset_class: holding.asset_class,
            source,
            base_amount,
            display_value,
            class_weight: None,
        });
    }

    per_class_total.insert(AssetClass::Cash, net_cash(cash_records));

    for value in &mut values {
        let class_total = per_class_total
            .get(&value.asset_class)
            .copied()
            .unwrap_or(0.0);
        if class_total > 0.0 {
            value.class_weight = Some(value.display_value / class_total * 100.0);
        }
    }

    let grand_total = per_class_total.values().sum();

    Valuation {
        per_class_total,
        grand_total,
        holdings: values,
        skipped,
        cash_record_count: cash_records.len(),
    }
}
