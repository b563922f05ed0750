//! Trend classification for a coverage time series
//!
//! Direction compares the first and last observed values of a series in
//! year order. Changes within [`STABLE_MARGIN`] percentage points count as
//! noise.

use crate::tiers::TARGET_COVERAGE;
use serde::{Deserialize, Serialize};

/// Noise tolerance, in percentage points, for trend direction
pub const STABLE_MARGIN: f64 = 2.0;

/// Direction of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    /// Fewer than two observed values
    InsufficientData,
}

impl TrendDirection {
    /// Get the direction name
    pub fn name(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
            TrendDirection::InsufficientData => "insufficient data",
        }
    }
}

/// Trend of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// First observed value
    pub first: Option<f64>,
    /// Last observed value
    pub last: Option<f64>,
    /// Number of observed (non-absent) values
    pub observations: usize,
}

impl TrendResult {
    /// `last - first`, when both exist
    pub fn change(&self) -> Option<f64> {
        match (self.first, self.last, self.observations) {
            (Some(first), Some(last), n) if n >= 2 => Some(last - first),
            _ => None,
        }
    }
}

/// Classify a `(label, value)` series with the default margin
pub fn trend<L>(series: &[(L, Option<f64>)]) -> TrendResult {
    trend_with_margin(series, STABLE_MARGIN)
}

/// Classify a `(label, value)` series with an explicit noise margin
///
/// Absent values are skipped; the series is assumed to be in year order.
pub fn trend_with_margin<L>(series: &[(L, Option<f64>)], margin: f64) -> TrendResult {
    let mut observed = series.iter().filter_map(|(_, value)| *value);
    let first = observed.next();
    let (last, observations) = match first {
        Some(first) => observed.fold((first, 1), |(_, n), v| (v, n + 1)),
        None => {
            return TrendResult {
                direction: TrendDirection::InsufficientData,
                first: None,
                last: None,
                observations: 0,
            }
        }
    };

    let direction = match first {
        Some(first) if observations >= 2 => {
            if last > first + margin {
                TrendDirection::Increasing
            } else if last < first - margin {
                TrendDirection::Decreasing
            } else {
                TrendDirection::Stable
            }
        }
        _ => TrendDirection::InsufficientData,
    };

    TrendResult {
        direction,
        first,
        last: Some(last),
        observations,
    }
}

/// Distance from a mean coverage to the default 95% target
pub fn gap_to_target(mean: f64) -> f64 {
    gap_to(mean, TARGET_COVERAGE)
}

/// Distance from a mean coverage to an explicit target
///
/// Positive when the mean falls short of the target.
pub fn gap_to(mean: f64, target: f64) -> f64 {
    target - mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[(2014, Some(80.0)), (2015, Some(82.0)), (2016, Some(95.0))], TrendDirection::Increasing)]
    #[case(&[(2014, Some(90.0)), (2015, Some(89.0)), (2016, Some(88.0))], TrendDirection::Decreasing)]
    #[case(&[(2014, Some(90.0)), (2015, Some(91.0))], TrendDirection::Stable)]
    #[case(&[(2014, Some(90.0)), (2015, Some(92.0))], TrendDirection::Stable)]
    #[case(&[(2014, Some(90.0)), (2015, Some(88.0))], TrendDirection::Stable)]
    #[case(&[(2014, Some(90.0))], TrendDirection::InsufficientData)]
    #[case(&[], TrendDirection::InsufficientData)]
    fn test_trend_direction(#[case] series: &[(i32, Option<f64>)], #[case] expected: TrendDirection) {
        assert_eq!(trend(series).direction, expected);
    }

    #[test]
    fn test_absent_values_skipped() {
        let series = [
            ("2014", None),
            ("2015", Some(70.0)),
            ("2016", None),
            ("2017", Some(85.0)),
            ("2018", None),
        ];
        let result = trend(&series);
        assert_eq!(result.direction, TrendDirection::Increasing);
        assert_eq!(result.first, Some(70.0));
        assert_eq!(result.last, Some(85.0));
        assert_eq!(result.observations, 2);
        assert_eq!(result.change(), Some(15.0));
    }

    #[test]
    fn test_only_absent_values() {
        let series: [(&str, Option<f64>); 2] = [("2014", None), ("2015", None)];
        let result = trend(&series);
        assert_eq!(result.direction, TrendDirection::InsufficientData);
        assert_eq!(result.observations, 0);
        assert_eq!(result.change(), None);
    }

    #[test]
    fn test_single_observation_keeps_value() {
        let result = trend(&[("2014", None), ("2015", Some(91.0))]);
        assert_eq!(result.direction, TrendDirection::InsufficientData);
        assert_eq!(result.first, Some(91.0));
        assert_eq!(result.change(), None);
    }

    #[test]
    fn test_custom_margin() {
        let series = [(2014, Some(90.0)), (2015, Some(91.5))];
        assert_eq!(trend_with_margin(&series, 1.0).direction, TrendDirection::Increasing);
        assert_eq!(trend(&series).direction, TrendDirection::Stable);
    }

    #[test]
    fn test_gap_to_target() {
        assert_eq!(gap_to_target(90.0), 5.0);
        assert_eq!(gap_to_target(97.5), -2.5);
        assert_eq!(gap_to(85.0, 90.0), 5.0);
    }
}
