use super::currency::Multipliers;
use super::holding::{CashRecord, Fund, Holding};
use super::series::MonthlySeries;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyConfig {
    #[serde(default = "default_base_currency")]
    pub base: String,
    #[serde(default = "default_display_currency")]
    pub display: String,
    #[serde(flatten)]
    pub multipliers: Multipliers,
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_display_currency() -> String {
    "SAR".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            base: default_base_currency(),
            display: default_display_currency(),
            multipliers: Multipliers::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub funds: Vec<Fund>,
    pub default_fund: Option<String>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    /// Monthly values keyed by holding name.
    #[serde(default)]
    pub series: HashMap<String, MonthlySeries>,
    #[serde(default)]
    pub cash_records: Vec<CashRecord>,
    #[serde(default)]
    pub currency: CurrencyConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "famfund", "famfund")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "famfund", "famfund")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.currency.multipliers.is_valid() {
            bail!(
                "Currency multipliers must be positive numbers, got {:?}",
                self.currency.multipliers
            );
        }
        if let Some(id) = &self.default_fund {
            if !self.funds.iter().any(|f| &f.id == id) {
                bail!("Default fund '{id}' is not listed under funds");
            }
        }
        Ok(())
    }

    /// The fund to report on: the requested id, else `default_fund`, else the first listed.
    pub fn fund_id<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested
            .or(self.default_fund.as_deref())
            .or_else(|| self.funds.first().map(|f| f.id.as_str()))
    }
}
