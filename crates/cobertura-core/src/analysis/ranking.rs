//! Rankings: top departments, top indicators and departments below target

use crate::dataset::CoverageDataset;
use crate::error::CoberturaResult;
use crate::selection::{Group, Ranking, RankingSelection};
use crate::table::CoverageTable;
use cobertura_stats::CoverageThresholds;
use serde::{Deserialize, Serialize};

/// Advice shown with a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingAdvice {
    /// Highest ranking where every entry meets the target
    AllMeetTarget,
    /// Highest ranking with at least one entry below target
    SomeBelowTarget,
    /// Lowest ranking with at least one entry below the moderate floor
    SomeCritical,
    /// Lowest ranking with every entry at or above the moderate floor
    AcceptableButImprovable,
    NoData,
}

impl RankingAdvice {
    pub fn assess(ranking: Ranking, values: &[f64], thresholds: &CoverageThresholds) -> Self {
        if values.is_empty() {
            return RankingAdvice::NoData;
        }
        match ranking {
            Ranking::Highest if values.iter().all(|&v| v >= thresholds.target) => {
                RankingAdvice::AllMeetTarget
            }
            Ranking::Highest => RankingAdvice::SomeBelowTarget,
            Ranking::Lowest if values.iter().any(|&v| v < thresholds.moderate_floor) => {
                RankingAdvice::SomeCritical
            }
            Ranking::Lowest => RankingAdvice::AcceptableButImprovable,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RankingAdvice::AllMeetTarget => {
                "Every entry exceeds the coverage target; keep the current strategies"
            }
            RankingAdvice::SomeBelowTarget => {
                "Good results, but not every entry reaches the coverage target yet"
            }
            RankingAdvice::SomeCritical => {
                "Some entries are critically low; vaccination campaigns need urgent reinforcement"
            }
            RankingAdvice::AcceptableButImprovable => {
                "Coverage is acceptable but can still improve; keep reinforcing vaccination"
            }
            RankingAdvice::NoData => "No coverage data for this selection",
        }
    }
}

/// One ranked department or indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub coverage: f64,
}

/// A top-N ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    pub year: String,
    pub ranking: Ranking,
    pub entries: Vec<RankedEntry>,
    pub advice: RankingAdvice,
}

fn rank(
    mut entries: Vec<RankedEntry>,
    selection: &RankingSelection,
    limit: usize,
    thresholds: &CoverageThresholds,
) -> RankingResult {
    // Stable sort keeps source order among ties
    match selection.ranking {
        Ranking::Highest => entries.sort_by(|a, b| b.coverage.total_cmp(&a.coverage)),
        Ranking::Lowest => entries.sort_by(|a, b| a.coverage.total_cmp(&b.coverage)),
    }
    entries.truncate(limit);

    let values: Vec<f64> = entries.iter().map(|e| e.coverage).collect();
    RankingResult {
        year: selection.year.clone(),
        ranking: selection.ranking,
        advice: RankingAdvice::assess(selection.ranking, &values, thresholds),
        entries,
    }
}

/// Departments ranked by coverage of one indicator in one year
///
/// Departments without an observation are left out.
pub fn top_departments(
    dataset: &CoverageDataset,
    selection: &RankingSelection,
    indicator: &str,
) -> CoberturaResult<RankingResult> {
    let table = &dataset.table;
    table.check_year(&selection.year)?;
    let indicator = table.resolve_indicator(indicator)?;

    let entries = table
        .rows(&selection.year)
        .iter()
        .filter_map(|row| {
            Some(RankedEntry {
                name: row.department().to_string(),
                coverage: row.value(&indicator)?,
            })
        })
        .collect();

    let limit = selection.limit.unwrap_or(dataset.config.ranking.top_n);
    Ok(rank(entries, selection, limit, &dataset.config.coverage))
}

/// Indicators ranked by coverage for one department in one year
pub fn top_indicators(
    dataset: &CoverageDataset,
    selection: &RankingSelection,
    department: &str,
) -> CoberturaResult<RankingResult> {
    let table = &dataset.table;
    table.check_year(&selection.year)?;

    let entries = match table.row_for(&selection.year, department) {
        Some(row) => table
            .catalog()
            .iter()
            .filter_map(|indicator| {
                Some(RankedEntry {
                    name: indicator.name().to_string(),
                    coverage: row.value(indicator)?,
                })
            })
            .collect(),
        None => Vec::new(),
    };

    let limit = selection.limit.unwrap_or(dataset.config.ranking.top_n);
    Ok(rank(entries, selection, limit, &dataset.config.coverage))
}

/// A department below the coverage target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BelowTargetEntry {
    pub department: String,
    pub coverage: f64,
    pub is_high_pdet: bool,
}

/// Departments below target in the latest year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BelowTarget {
    pub year: Option<String>,
    pub indicator: String,
    pub target: f64,
    /// Ascending by coverage
    pub departments: Vec<BelowTargetEntry>,
}

/// Every department whose latest-year coverage falls below the target
pub fn below_target(dataset: &CoverageDataset, indicator: &str) -> CoberturaResult<BelowTarget> {
    let table: &CoverageTable = &dataset.table;
    let indicator = table.resolve_indicator(indicator)?;
    let target = dataset.config.coverage.target;
    let year = table.latest_year();

    let mut departments: Vec<BelowTargetEntry> = year
        .map(|year| table.rows(year))
        .unwrap_or(&[])
        .iter()
        .filter_map(|row| {
            let coverage = row.value(&indicator)?;
            (coverage < target).then(|| BelowTargetEntry {
                department: row.department().to_string(),
                coverage,
                is_high_pdet: dataset.classification.group_of(row.department())
                    == Some(Group::High),
            })
        })
        .collect();
    departments.sort_by(|a, b| a.coverage.total_cmp(&b.coverage));

    Ok(BelowTarget {
        year: year.map(str::to_string),
        indicator: indicator.name().to_string(),
        target,
        departments,
    })
}
