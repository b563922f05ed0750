//! Department time series

use crate::config::AnalysisConfig;
use crate::error::CoberturaResult;
use crate::table::CoverageTable;
use cobertura_stats::{gap_to, trend_with_margin, TrendResult};
use serde::Serialize;

/// One year of a department series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: String,
    pub value: Option<f64>,
}

/// Coverage of one department and indicator across all years
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSeries {
    pub department: String,
    pub indicator: String,
    pub points: Vec<SeriesPoint>,
    pub trend: TrendResult,
    /// Target minus the latest observed value
    pub gap_to_target: Option<f64>,
}

/// Yearly values and trend of one department
///
/// An unknown department yields a series with every value absent.
pub fn department_series(
    table: &CoverageTable,
    department: &str,
    indicator: &str,
    config: &AnalysisConfig,
) -> CoberturaResult<DepartmentSeries> {
    let indicator = table.resolve_indicator(indicator)?;

    let points: Vec<SeriesPoint> = table
        .years()
        .iter()
        .map(|year| SeriesPoint {
            year: year.clone(),
            value: table.value(year, department, &indicator),
        })
        .collect();

    let series: Vec<(&str, Option<f64>)> =
        points.iter().map(|p| (p.year.as_str(), p.value)).collect();
    let trend = trend_with_margin(&series, config.trend.stable_margin);
    let gap_to_target = trend.last.map(|last| gap_to(last, config.coverage.target));

    Ok(DepartmentSeries {
        department: department.trim().to_string(),
        indicator: indicator.name().to_string(),
        points,
        trend,
        gap_to_target,
    })
}
