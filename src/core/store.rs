//! Data-access abstraction the valuation layer reads from.

use super::allocation::AllocationPlan;
use super::error::{Error, Result};
use super::holding::{AssetClass, CashRecord, Fund, Holding};
use super::series::MonthlySeries;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;

#[async_trait]
pub trait FundStore: Send + Sync {
    async fn list_holdings(&self, asset_class: AssetClass) -> Result<Vec<Holding>>;

    async fn get_monthly_series(&self, name: &str) -> Result<MonthlySeries>;

    async fn list_cash_records(&self) -> Result<Vec<CashRecord>>;

    async fn get_fund(&self, id: &str) -> Result<Fund>;

    /// The last committed plan, or the default plan if none was saved.
    async fn get_allocation_plan(&self) -> Result<AllocationPlan>;

    /// Persists a plan. Fails with a validation error, leaving the stored plan
    /// as it was, if the percentages do not sum to 100.
    async fn save_allocation_plan(&self, plan: &AllocationPlan) -> Result<()>;
}

/// Everything needed for one valuation, read in a single pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub holdings: Vec<Holding>,
    pub series: HashMap<String, MonthlySeries>,
    pub cash_records: Vec<CashRecord>,
}

impl Snapshot {
    /// Loads holdings of every class, their series and all cash records.
    ///
    /// Holdings without a series are left out of `series`; `on_progress` is
    /// called once per holding whose series lookup completed.
    pub async fn load(store: &dyn FundStore, on_progress: &(dyn Fn() + Sync)) -> Result<Self> {
        let mut holdings = Vec::new();
        for class in AssetClass::ALL {
            holdings.extend(store.list_holdings(class).await?);
        }

        let lookups = holdings.iter().map(|holding| async move {
            let result = store.get_monthly_series(&holding.name).await;
            on_progress();
            (holding.name.clone(), result)
        });

        let mut series = HashMap::new();
        for (name, result) in join_all(lookups).await {
            match result {
                Ok(s) => {
                    series.insert(name, s);
                }
                Err(Error::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        let cash_records = store.list_cash_records().await?;

        Ok(Self {
            holdings,
            series,
            cash_records,
        })
    }
}
