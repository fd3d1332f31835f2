pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::error::{NotFoundError, Result};
use crate::core::holding::{AssetClass, CashRecord, Fund, Holding};
use crate::core::series::MonthlySeries;
use crate::core::store::FundStore;
use anyhow::Context;
use disk::DiskStore;
use memory::MemoryStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only fund records shared by the store implementations.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub holdings: Vec<Holding>,
    pub series: HashMap<String, MonthlySeries>,
    pub cash_records: Vec<CashRecord>,
    pub funds: Vec<Fund>,
}

impl Records {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            holdings: config.holdings.clone(),
            series: config.series.clone(),
            cash_records: config.cash_records.clone(),
            funds: config.funds.clone(),
        }
    }

    pub fn holdings_of(&self, asset_class: AssetClass) -> Vec<Holding> {
        self.holdings
            .iter()
            .filter(|h| h.asset_class == asset_class)
            .cloned()
            .collect()
    }

    pub fn series(&self, name: &str) -> Result<MonthlySeries> {
        self.series
            .get(name)
            .cloned()
            .ok_or_else(|| NotFoundError::Series(name.to_string()).into())
    }

    pub fn fund(&self, id: &str) -> Result<Fund> {
        self.funds
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| NotFoundError::Fund(id.to_string()).into())
    }
}

/// Opens the persistent store under the configured data path.
pub fn open(config: &AppConfig) -> anyhow::Result<Arc<dyn FundStore>> {
    let path = config.default_data_path()?.join("store");
    let store = DiskStore::open(&path, Records::from_config(config))
        .with_context(|| format!("Failed to open fund store at {}", path.display()))?;
    debug!("Using persistent store at {}", path.display());
    Ok(Arc::new(store))
}

/// Like [`open`], but falls back to an in-memory store when the data
/// directory is unusable. Only for commands that never save.
pub fn open_read_only(config: &AppConfig) -> Arc<dyn FundStore> {
    open(config).unwrap_or_else(|e| {
        warn!("Using in-memory store with the default plan: {e:#}");
        Arc::new(MemoryStore::new(Records::from_config(config)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::allocation::AllocationPlan;

    fn config_with_data_path(path: &std::path::Path) -> AppConfig {
        let mut config: AppConfig = serde_yaml::from_str("holdings: []\n").unwrap();
        config.data_path = Some(path.display().to_string());
        config
    }

    #[tokio::test]
    async fn test_open_rejects_unusable_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data");
        std::fs::write(&file, "plain file").unwrap();
        let config = config_with_data_path(&file);

        assert!(open(&config).is_err());

        let store = open_read_only(&config);
        assert_eq!(
            store.get_allocation_plan().await.unwrap(),
            AllocationPlan::default()
        );
    }

    #[tokio::test]
    async fn test_open_persists_under_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_data_path(dir.path());
        let plan = AllocationPlan::new(70, 20, 5, 5);

        open(&config).unwrap().save_allocation_plan(&plan).await.unwrap();

        assert!(dir.path().join("store").is_dir());
        assert_eq!(
            open(&config).unwrap().get_allocation_plan().await.unwrap(),
            plan
        );
    }
}
