//! Error types for the valuation and allocation layer.
//!
//! Storage failures are carried as strings so the core does not depend on
//! any particular storage engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Storage operation failed: {0}")]
    Storage(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("allocation percentages sum to {sum}, expected 100")]
    AllocationSum { sum: u32 },

    #[error("{field} percentage {value} is outside 0..=100")]
    PercentageOutOfRange { field: &'static str, value: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("fund '{0}'")]
    Fund(String),

    #[error("monthly series for '{0}'")]
    Series(String),
}

/// A holding the aggregator could not value. Never fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    pub name: String,
    pub reason: String,
}
