//! Selection parameters for dashboard views
//!
//! Views take these explicit values instead of reading shared state; the
//! caller re-evaluates a view whenever its selection changes.

use crate::config::PeriodConfig;
use serde::{Deserialize, Serialize};

/// PDET concentration group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Departments with at least the threshold of PDET municipalities
    High,
    /// All remaining departments
    Low,
}

impl Group {
    pub fn label(&self) -> &'static str {
        match self {
            Group::High => "high PDET concentration",
            Group::Low => "low PDET concentration",
        }
    }
}

/// Period relative to the 2016 peace agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Before,
    After,
    Both,
}

impl Period {
    /// All periods in display order
    pub fn all() -> [Period; 3] {
        [Period::Before, Period::After, Period::Both]
    }

    /// Year labels of this period
    pub fn years(&self, periods: &PeriodConfig) -> Vec<String> {
        match self {
            Period::Before => periods.before.clone(),
            Period::After => periods.after.clone(),
            Period::Both => periods
                .before
                .iter()
                .chain(periods.after.iter())
                .cloned()
                .collect(),
        }
    }

    /// Display label including the year span
    pub fn label(&self, periods: &PeriodConfig) -> String {
        let name = match self {
            Period::Before => "Before the peace agreement",
            Period::After => "After the peace agreement",
            Period::Both => "Both periods",
        };
        let years = self.years(periods);
        match (years.first(), years.last()) {
            (Some(first), Some(last)) if first != last => format!("{} ({}-{})", name, first, last),
            (Some(only), _) => format!("{} ({})", name, only),
            _ => name.to_string(),
        }
    }
}

/// Year filter of the global statistics view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearFilter {
    All,
    Year(String),
}

/// Indicator filter of the global statistics view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorFilter {
    All,
    Indicator(String),
}

/// Selection of the global statistics view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSelection {
    pub year: YearFilter,
    pub indicator: IndicatorFilter,
}

/// Selection of a group comparison (hypothesis test)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupComparisonSelection {
    pub period: Period,
    pub indicator: String,
}

/// Ranking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    Highest,
    Lowest,
}

/// Selection of a top-N ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSelection {
    pub year: String,
    pub ranking: Ranking,
    /// Number of entries, the configured default when `None`
    pub limit: Option<usize>,
}
