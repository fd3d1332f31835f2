use super::Records;
use crate::core::allocation::AllocationPlan;
use crate::core::error::Result;
use crate::core::holding::{AssetClass, CashRecord, Fund, Holding};
use crate::core::series::MonthlySeries;
use crate::core::store::FundStore;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Store keeping the committed plan in memory for the life of the process.
pub struct MemoryStore {
    records: Records,
    plan: RwLock<Option<AllocationPlan>>,
}

impl MemoryStore {
    pub fn new(records: Records) -> Self {
        Self {
            records,
            plan: RwLock::new(None),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Records::default())
    }
}

#[async_trait]
impl FundStore for MemoryStore {
    async fn list_holdings(&self, asset_class: AssetClass) -> Result<Vec<Holding>> {
        Ok(self.records.holdings_of(asset_class))
    }

    async fn get_monthly_series(&self, name: &str) -> Result<MonthlySeries> {
        self.records.series(name)
    }

    async fn list_cash_records(&self) -> Result<Vec<CashRecord>> {
        Ok(self.records.cash_records.clone())
    }

    async fn get_fund(&self, id: &str) -> Result<Fund> {
        self.records.fund(id)
    }

    async fn get_allocation_plan(&self) -> Result<AllocationPlan> {
        Ok(self.plan.read().await.unwrap_or_default())
    }

    async fn save_allocation_plan(&self, plan: &AllocationPlan) -> Result<()> {
        plan.check()?;
        *self.plan.write().await = Some(*plan);
        debug!("Committed allocation plan: {plan:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{Error, NotFoundError, ValidationError};
    use crate::core::month::Month;
    use crate::core::store::Snapshot;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn records() -> Records {
        let mut series = HashMap::new();
        series.insert(
            "Sukuk".to_string(),
            MonthlySeries::new().with(Month::May, 1020.0),
        );
        Records {
            holdings: vec![
                Holding::new("SPUS ETF", 57.24, AssetClass::Equity),
                Holding::new("Sukuk", 1000.0, AssetClass::Bond),
            ],
            series,
            cash_records: vec![CashRecord {
                id: Some("c1".to_string()),
                amount: 250.0,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                note: None,
            }],
            funds: vec![Fund {
                id: "family".to_string(),
                target_value: 1_000_000.0,
                fund_type: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_default_plan_when_nothing_saved() {
        let store = MemoryStore::default();
        assert_eq!(
            store.get_allocation_plan().await.unwrap(),
            AllocationPlan::new(60, 30, 8, 2)
        );
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_previous_plan() {
        let store = MemoryStore::default();
        store
            .save_allocation_plan(&AllocationPlan::new(50, 40, 5, 5))
            .await
            .unwrap();

        let err = store
            .save_allocation_plan(&AllocationPlan::new(60, 30, 8, 3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::AllocationSum { sum: 101 })
        ));
        assert_eq!(
            store.get_allocation_plan().await.unwrap(),
            AllocationPlan::new(50, 40, 5, 5)
        );
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = MemoryStore::new(records());

        assert_eq!(store.list_holdings(AssetClass::Equity).await.unwrap().len(), 1);
        assert!(store.list_holdings(AssetClass::Alternative).await.unwrap().is_empty());
        assert_eq!(store.get_fund("family").await.unwrap().target_value, 1_000_000.0);
        assert!(matches!(
            store.get_fund("other").await,
            Err(Error::NotFound(NotFoundError::Fund(_)))
        ));
        assert!(matches!(
            store.get_monthly_series("SPUS ETF").await,
            Err(Error::NotFound(NotFoundError::Series(_)))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_skips_missing_series() {
        let store = MemoryStore::new(records());
        let calls = AtomicUsize::new(0);

        let snapshot = Snapshot::load(&store, &|| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

        assert_eq!(snapshot.holdings.len(), 2);
        assert_eq!(snapshot.series.len(), 1);
        assert!(snapshot.series.contains_key("Sukuk"));
        assert_eq!(snapshot.cash_records.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
