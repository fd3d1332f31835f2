use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Equity,
    Bond,
    Alternative,
    Cash,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Equity,
        AssetClass::Bond,
        AssetClass::Alternative,
        AssetClass::Cash,
    ];

    /// Returns display name and emoji for the class
    pub fn display_info(&self) -> (&'static str, &'static str) {
        match self {
            AssetClass::Equity => ("Equities", "📈"),
            AssetClass::Bond => ("Fixed Income", "📉"),
            AssetClass::Alternative => ("Alternatives", "🏗"),
            AssetClass::Cash => ("Cash", "💵"),
        }
    }
}

impl Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_info().0)
    }
}

/// A holding's base value as written in the source record.
///
/// Anything that is not a number is kept as-is so one bad record does not
/// stop the rest of the fund from loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseValue {
    Number(f64),
    Other(serde_yaml::Value),
}

/// An equity company, bond or alternative investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// Value in the instrument's base currency.
    #[serde(default)]
    pub base_value: Option<BaseValue>,
    pub asset_class: AssetClass,
    /// Sector, rating, country and similar descriptive fields.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Holding {
    pub fn new(name: &str, base_value: f64, asset_class: AssetClass) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            base_value: Some(BaseValue::Number(base_value)),
            asset_class,
            metadata: BTreeMap::new(),
        }
    }

    /// The base value if it is a finite number, otherwise why it is unusable.
    pub fn usable_base_value(&self) -> Result<f64, String> {
        match &self.base_value {
            Some(BaseValue::Number(v)) if v.is_finite() => Ok(*v),
            Some(BaseValue::Number(v)) => Err(format!("base value {v} is not a number")),
            Some(BaseValue::Other(raw)) => Err(format!("base value {raw:?} is not a number")),
            None => Err("missing base value".to_string()),
        }
    }
}

/// A single savings movement, already in display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashRecord {
    #[serde(default)]
    pub id: Option<String>,
    /// Positive for inflows, negative for outflows.
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: String,
    /// Target size of the fund in display currency.
    pub target_value: f64,
    #[serde(rename = "type", default)]
    pub fund_type: Option<String>,
}
