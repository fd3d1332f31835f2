use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Calendar month used as the key of a monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Lookback order used when searching for the latest populated month.
    pub const LOOKBACK: [Month; 12] = [
        Month::Dec,
        Month::Nov,
        Month::Oct,
        Month::Sep,
        Month::Aug,
        Month::Jul,
        Month::Jun,
        Month::May,
        Month::Apr,
        Month::Mar,
        Month::Feb,
        Month::Jan,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Month::Jan => "jan",
            Month::Feb => "feb",
            Month::Mar => "mar",
            Month::Apr => "apr",
            Month::May => "may",
            Month::Jun => "jun",
            Month::Jul => "jul",
            Month::Aug => "aug",
            Month::Sep => "sep",
            Month::Oct => "oct",
            Month::Nov => "nov",
            Month::Dec => "dec",
        }
    }

    /// 1-based calendar number, matching `chrono::Datelike::month`.
    pub fn number(&self) -> u32 {
        Month::ALL
            .iter()
            .position(|m| m == self)
            .map_or(0, |idx| idx as u32 + 1)
    }

    pub fn from_number(number: u32) -> Option<Month> {
        number
            .checked_sub(1)
            .and_then(|idx| Month::ALL.get(idx as usize).copied())
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
