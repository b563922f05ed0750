//! Global statistics card

use crate::catalog::Indicator;
use crate::config::AnalysisConfig;
use crate::error::CoberturaResult;
use crate::selection::{GlobalSelection, IndicatorFilter, YearFilter};
use crate::table::CoverageTable;
use cobertura_stats::{summarize, CoverageTier, FloorTier, PeakTier, SpreadTier, StatSummary};
use serde::Serialize;

/// Summary over every department row of the selected years and indicators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalStatistics {
    pub years: Vec<String>,
    pub indicators: Vec<String>,
    pub summary: StatSummary,
    pub coverage_tier: Option<CoverageTier>,
    pub spread_tier: Option<SpreadTier>,
    pub peak_tier: Option<PeakTier>,
    pub floor_tier: Option<FloorTier>,
}

/// Compute the global statistics card for a selection
///
/// The national `TOTAL` row never contributes. Tiers are `None` when the
/// selection has no observations.
pub fn global_statistics(
    table: &CoverageTable,
    selection: &GlobalSelection,
    config: &AnalysisConfig,
) -> CoberturaResult<GlobalStatistics> {
    let years: Vec<String> = match &selection.year {
        YearFilter::All => table.years().to_vec(),
        YearFilter::Year(year) => {
            table.check_year(year)?;
            vec![year.clone()]
        }
    };

    let indicators: Vec<Indicator> = match &selection.indicator {
        IndicatorFilter::All => table.catalog().iter().cloned().collect(),
        IndicatorFilter::Indicator(name) => vec![table.resolve_indicator(name)?],
    };

    let values: Vec<f64> = indicators
        .iter()
        .flat_map(|indicator| table.values_for(table.departments(), &years, indicator))
        .collect();
    let summary = summarize(&values);
    tracing::debug!(
        "Global statistics over {} years and {} indicators: {} values",
        years.len(),
        indicators.len(),
        summary.count
    );

    Ok(GlobalStatistics {
        coverage_tier: summary
            .mean
            .map(|mean| CoverageTier::classify_with(mean, &config.coverage)),
        spread_tier: summary
            .std_dev
            .map(|std_dev| SpreadTier::classify_with(std_dev, &config.spread)),
        peak_tier: summary
            .max
            .map(|max| PeakTier::classify_with(max, &config.coverage)),
        floor_tier: summary
            .min
            .map(|min| FloorTier::classify_with(min, &config.coverage)),
        years,
        indicators: indicators.iter().map(|i| i.name().to_string()).collect(),
        summary,
    })
}
