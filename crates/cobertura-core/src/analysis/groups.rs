//! PDET group views: per-period summaries, means and the coverage gap

use crate::dataset::CoverageDataset;
use crate::error::CoberturaResult;
use crate::selection::{Group, Period};
use cobertura_stats::{gap_to, mean, summarize, trend_with_margin, StatSummary, TrendResult};
use serde::{Deserialize, Serialize};

/// How two group means relate to each other and to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupVerdict {
    BothMeetTarget,
    OnlyHighMeetsTarget,
    OnlyLowMeetsTarget,
    /// Neither meets the target; the high group has the higher mean
    HighGroupHigher,
    /// Neither meets the target; the low group has the higher mean
    LowGroupHigher,
    /// Neither meets the target and the means are equal
    SimilarBelowTarget,
}

impl GroupVerdict {
    /// Compare the high and low group means against a target
    pub fn assess(high_mean: f64, low_mean: f64, target: f64) -> Self {
        match (high_mean >= target, low_mean >= target) {
            (true, true) => GroupVerdict::BothMeetTarget,
            (true, false) => GroupVerdict::OnlyHighMeetsTarget,
            (false, true) => GroupVerdict::OnlyLowMeetsTarget,
            (false, false) if high_mean > low_mean => GroupVerdict::HighGroupHigher,
            (false, false) if low_mean > high_mean => GroupVerdict::LowGroupHigher,
            (false, false) => GroupVerdict::SimilarBelowTarget,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GroupVerdict::BothMeetTarget => "both groups meet the coverage target",
            GroupVerdict::OnlyHighMeetsTarget => {
                "only the high PDET concentration group meets the coverage target"
            }
            GroupVerdict::OnlyLowMeetsTarget => {
                "only the low PDET concentration group meets the coverage target"
            }
            GroupVerdict::HighGroupHigher => {
                "the high PDET concentration group has higher coverage, both below target"
            }
            GroupVerdict::LowGroupHigher => {
                "the low PDET concentration group has higher coverage, both below target"
            }
            GroupVerdict::SimilarBelowTarget => "both groups have similar coverage below target",
        }
    }
}

/// Min, mean and max of both groups over one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPeriodSummary {
    pub period: Period,
    pub label: String,
    pub years: Vec<String>,
    pub high: StatSummary,
    pub low: StatSummary,
    /// `None` when either group has no observations
    pub verdict: Option<GroupVerdict>,
}

/// Group statistics for the before, after and both periods
pub fn group_period_summaries(
    dataset: &CoverageDataset,
    indicator: &str,
) -> CoberturaResult<Vec<GroupPeriodSummary>> {
    let indicator = dataset.table.resolve_indicator(indicator)?;
    let periods = &dataset.config.periods;
    let target = dataset.config.coverage.target;

    let summaries = Period::all()
        .into_iter()
        .map(|period| {
            let years = period.years(periods);
            let high = summarize(&dataset.group_values(Group::High, &years, &indicator));
            let low = summarize(&dataset.group_values(Group::Low, &years, &indicator));
            let verdict = match (high.mean, low.mean) {
                (Some(h), Some(l)) => Some(GroupVerdict::assess(h, l, target)),
                _ => None,
            };
            GroupPeriodSummary {
                period,
                label: period.label(periods),
                years,
                high,
                low,
                verdict,
            }
        })
        .collect();
    Ok(summaries)
}

/// Mean and sample size of each group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans {
    pub high_mean: Option<f64>,
    pub high_count: usize,
    pub low_mean: Option<f64>,
    pub low_count: usize,
}

impl GroupMeans {
    fn from_values(high: &[f64], low: &[f64]) -> Self {
        Self {
            high_mean: mean(high),
            high_count: high.len(),
            low_mean: mean(low),
            low_count: low.len(),
        }
    }
}

/// Group means of one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodMeans {
    pub period: Period,
    pub label: String,
    pub means: GroupMeans,
}

/// Group means for every period
pub fn period_means(dataset: &CoverageDataset, indicator: &str) -> CoberturaResult<Vec<PeriodMeans>> {
    let indicator = dataset.table.resolve_indicator(indicator)?;
    let periods = &dataset.config.periods;

    Ok(Period::all()
        .into_iter()
        .map(|period| {
            let years = period.years(periods);
            let high = dataset.group_values(Group::High, &years, &indicator);
            let low = dataset.group_values(Group::Low, &years, &indicator);
            PeriodMeans {
                period,
                label: period.label(periods),
                means: GroupMeans::from_values(&high, &low),
            }
        })
        .collect())
}

/// Group means of one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroupMeans {
    pub year: String,
    pub high_mean: Option<f64>,
    pub low_mean: Option<f64>,
}

/// Group means for every year of the table
pub fn yearly_group_means(
    dataset: &CoverageDataset,
    indicator: &str,
) -> CoberturaResult<Vec<YearGroupMeans>> {
    let indicator = dataset.table.resolve_indicator(indicator)?;

    Ok(dataset
        .table
        .years()
        .iter()
        .map(|year| {
            let years = std::slice::from_ref(year);
            YearGroupMeans {
                year: year.clone(),
                high_mean: mean(&dataset.group_values(Group::High, years, &indicator)),
                low_mean: mean(&dataset.group_values(Group::Low, years, &indicator)),
            }
        })
        .collect())
}

/// Distance to target of each group in one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapPoint {
    pub year: String,
    pub high_gap: Option<f64>,
    pub low_gap: Option<f64>,
}

/// Yearly coverage gap of both groups and the trend of each gap series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageGapTrend {
    pub indicator: String,
    pub target: f64,
    pub points: Vec<GapPoint>,
    pub high_trend: TrendResult,
    pub low_trend: TrendResult,
}

/// Gap between the coverage target and each group's yearly mean
///
/// A positive gap means the group falls short of the target. Years where a
/// group has no observations have no gap for that group.
pub fn coverage_gap_trend(
    dataset: &CoverageDataset,
    indicator: &str,
) -> CoberturaResult<CoverageGapTrend> {
    let means = yearly_group_means(dataset, indicator)?;
    let target = dataset.config.coverage.target;
    let margin = dataset.config.trend.stable_margin;

    let points: Vec<GapPoint> = means
        .into_iter()
        .map(|m| GapPoint {
            year: m.year,
            high_gap: m.high_mean.map(|v| gap_to(v, target)),
            low_gap: m.low_mean.map(|v| gap_to(v, target)),
        })
        .collect();

    let high_series: Vec<(&str, Option<f64>)> =
        points.iter().map(|p| (p.year.as_str(), p.high_gap)).collect();
    let low_series: Vec<(&str, Option<f64>)> =
        points.iter().map(|p| (p.year.as_str(), p.low_gap)).collect();

    Ok(CoverageGapTrend {
        indicator: dataset.table.resolve_indicator(indicator)?.name().to_string(),
        target,
        high_trend: trend_with_margin(&high_series, margin),
        low_trend: trend_with_margin(&low_series, margin),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use crate::error::CoberturaError;
    use cobertura_stats::TrendDirection;
    use rstest::rstest;

    #[rstest]
    #[case(96.0, 95.0, GroupVerdict::BothMeetTarget)]
    #[case(95.0, 90.0, GroupVerdict::OnlyHighMeetsTarget)]
    #[case(80.0, 97.0, GroupVerdict::OnlyLowMeetsTarget)]
    #[case(90.0, 85.0, GroupVerdict::HighGroupHigher)]
    #[case(85.0, 90.0, GroupVerdict::LowGroupHigher)]
    #[case(88.0, 88.0, GroupVerdict::SimilarBelowTarget)]
    fn test_verdict(#[case] high: f64, #[case] low: f64, #[case] expected: GroupVerdict) {
        assert_eq!(GroupVerdict::assess(high, low, 95.0), expected);
    }

    #[test]
    fn test_group_period_summaries() {
        let dataset = fixtures::dataset();
        let summaries = group_period_summaries(&dataset, "BCG").unwrap();
        assert_eq!(summaries.len(), 3);

        let before = &summaries[0];
        assert_eq!(before.period, Period::Before);
        assert_eq!(before.label, "Before the peace agreement (2014-2016)");
        assert_eq!(before.high.count, 5);
        assert_eq!(before.high.mean, Some(78.0));
        assert_eq!(before.high.min, Some(70.0));
        assert_eq!(before.high.max, Some(84.0));
        assert_eq!(before.low.count, 9);
        assert_eq!(before.low.min, Some(90.0));
        assert_eq!(before.low.max, Some(97.0));
        assert_eq!(before.verdict, Some(GroupVerdict::LowGroupHigher));

        let both = &summaries[2];
        assert_eq!(both.high.count, 11);
        assert_eq!(both.low.count, 18);
    }

    #[test]
    fn test_period_means() {
        let dataset = fixtures::dataset();
        let means = period_means(&dataset, "BCG").unwrap();

        let after = &means[1].means;
        assert_eq!(after.high_mean, Some(83.0));
        assert_eq!(after.high_count, 6);
        assert!((after.low_mean.unwrap() - 850.0 / 9.0).abs() < 1e-9);
        assert_eq!(after.low_count, 9);
    }

    #[test]
    fn test_yearly_group_means() {
        let dataset = fixtures::dataset();
        let means = yearly_group_means(&dataset, "BCG").unwrap();

        assert_eq!(means.len(), 6);
        assert_eq!(means[0].year, "2014");
        assert_eq!(means[0].high_mean, Some(75.0));
        // CHOCO is absent in 2015, so only CAUCA counts
        assert_eq!(means[1].high_mean, Some(82.0));
    }

    #[test]
    fn test_coverage_gap_trend() {
        let dataset = fixtures::dataset();
        let gap = coverage_gap_trend(&dataset, "BCG%").unwrap();

        assert_eq!(gap.indicator, "BCG");
        assert_eq!(gap.target, 95.0);
        assert_eq!(gap.points[0].high_gap, Some(20.0));
        assert_eq!(gap.points[5].high_gap, Some(10.0));
        assert_eq!(gap.high_trend.direction, TrendDirection::Decreasing);
        assert_eq!(gap.low_trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_empty_group_has_no_verdict() {
        let mut dataset = fixtures::dataset();
        dataset.classification.high_concentration.clear();

        let summaries = group_period_summaries(&dataset, "BCG").unwrap();
        assert!(summaries.iter().all(|s| s.high.is_empty() && s.verdict.is_none()));

        let gap = coverage_gap_trend(&dataset, "BCG").unwrap();
        assert!(gap.points.iter().all(|p| p.high_gap.is_none()));
        assert_eq!(gap.high_trend.direction, TrendDirection::InsufficientData);
    }

    #[test]
    fn test_unknown_indicator() {
        let dataset = fixtures::dataset();
        assert!(matches!(
            period_means(&dataset, "DPT"),
            Err(CoberturaError::UnknownIndicator(_))
        ));
    }
}
