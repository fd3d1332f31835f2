use super::Records;
use crate::core::allocation::AllocationPlan;
use crate::core::error::{Error, Result};
use crate::core::holding::{AssetClass, CashRecord, Fund, Holding};
use crate::core::series::MonthlySeries;
use crate::core::store::FundStore;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PLAN_PARTITION: &str = "allocation";
const PLAN_KEY: &str = "plan";

fn storage_error(e: impl std::fmt::Display) -> Error {
    Error::Storage(e.to_string())
}

/// Store persisting the committed allocation plan in a fjall keyspace.
pub struct DiskStore {
    records: Records,
    keyspace: Keyspace,
    plans: PartitionHandle,
}

impl DiskStore {
    pub fn open<P: AsRef<Path>>(path: P, records: Records) -> anyhow::Result<Self> {
        std::fs::create_dir_all(path.as_ref())?;
        let keyspace = fjall::Config::new(path.as_ref()).open()?;
        let plans = keyspace.open_partition(PLAN_PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened store at {}", path.as_ref().display());
        Ok(Self {
            records,
            keyspace,
            plans,
        })
    }
}

#[async_trait]
impl FundStore for DiskStore {
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
        match self.plans.get(PLAN_KEY).map_err(storage_error)? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(storage_error),
            None => {
                debug!("No committed plan stored, using default");
                Ok(AllocationPlan::default())
            }
        }
    }

    async fn save_allocation_plan(&self, plan: &AllocationPlan) -> Result<()> {
        plan.check()?;
        let bytes = serde_json::to_vec(plan).map_err(storage_error)?;
        self.plans.insert(PLAN_KEY, bytes).map_err(storage_error)?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(storage_error)?;
        debug!("Committed allocation plan: {plan:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ValidationError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_plan_defaults_then_persists() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path(), Records::default()).unwrap();

        assert_eq!(
            store.get_allocation_plan().await.unwrap(),
            AllocationPlan::default()
        );

        let plan = AllocationPlan::new(70, 20, 5, 5);
        store.save_allocation_plan(&plan).await.unwrap();
        assert_eq!(store.get_allocation_plan().await.unwrap(), plan);
    }

    #[tokio::test]
    async fn test_invalid_plan_not_written() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path(), Records::default()).unwrap();
        store
            .save_allocation_plan(&AllocationPlan::new(60, 30, 8, 2))
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
            AllocationPlan::new(60, 30, 8, 2)
        );
    }

    #[tokio::test]
    async fn test_plan_survives_reopen() {
        let dir = tempdir().unwrap();
        let plan = AllocationPlan::new(40, 40, 10, 10);
        {
            let store = DiskStore::open(dir.path(), Records::default()).unwrap();
            store.save_allocation_plan(&plan).await.unwrap();
        }

        let reopened = DiskStore::open(dir.path(), Records::default()).unwrap();
        assert_eq!(reopened.get_allocation_plan().await.unwrap(), plan);
    }
}
