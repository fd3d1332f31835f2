//! Valuation and allocation logic, independent of storage and presentation

pub mod allocation;
pub mod config;
pub mod currency;
pub mod error;
pub mod holding;
pub mod log;
pub mod month;
pub mod savings;
pub mod series;
pub mod store;
pub mod valuation;

// Re-export main types for cleaner imports
pub use allocation::{AllocationPlan, PlanSession, PlanState, Recommendation};
pub use currency::Multipliers;
pub use error::{Error, MalformedRecord, NotFoundError, Result, ValidationError};
pub use holding::{AssetClass, CashRecord, Fund, Holding};
pub use month::Month;
pub use series::MonthlySeries;
pub use store::{FundStore, Snapshot};
pub use valuation::Valuation;
