//! Summary of savings cash movements.
use super::holding::CashRecord;
use super::month::Month;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashSummary {
    pub inflows: f64,
    pub outflows: f64,
    pub net: f64,
    pub count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Net movement per (year, month).
    pub monthly_net: BTreeMap<(i32, Month), f64>,
}

pub fn summarize(records: &[CashRecord]) -> CashSummary {
    let mut summary = CashSummary {
        count: records.len(),
        ..Default::default()
    };

    for record in records {
        if record.amount >= 0.0 {
            summary.inflows += record.amount;
        } else {
            summary.outflows += record.amount;
        }
        summary.net += record.amount;

        summary.first_date = Some(
            summary
                .first_date
                .map_or(record.date, |d| d.min(record.date)),
        );
        summary.last_date = Some(summary.last_date.map_or(record.date, |d| d.max(record.date)));

        if let Some(month) = Month::from_number(record.date.month()) {
            *summary
                .monthly_net
                .entry((record.date.year(), month))
                .or_insert(0.0) += record.amount;
        }
    }

    summary
}
