//! Fixed classification policies for coverage values
//!
//! Coverage is bucketed against the recommended 95% target; spread is
//! bucketed on the population standard deviation. Thresholds live in
//! [`CoverageThresholds`] and [`SpreadThresholds`] so they can be
//! overridden, with the dashboard's policy as the default.

use serde::{Deserialize, Serialize};

/// Recommended minimum coverage (percent)
pub const TARGET_COVERAGE: f64 = 95.0;

/// Coverage below this is "low"
pub const MODERATE_COVERAGE_FLOOR: f64 = 80.0;

/// Minimum coverage below this is critical
pub const CRITICAL_COVERAGE_FLOOR: f64 = 60.0;

/// Maximum coverage at or above this is outstanding
pub const OUTSTANDING_COVERAGE: f64 = 100.0;

/// Standard deviation below this is homogeneous
pub const HOMOGENEOUS_SPREAD_BELOW: f64 = 5.0;

/// Standard deviation below this (and not homogeneous) is moderate
pub const MODERATE_SPREAD_BELOW: f64 = 10.0;

/// Coverage thresholds in percentage points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageThresholds {
    pub target: f64,
    pub moderate_floor: f64,
    pub critical_floor: f64,
    pub outstanding: f64,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            target: TARGET_COVERAGE,
            moderate_floor: MODERATE_COVERAGE_FLOOR,
            critical_floor: CRITICAL_COVERAGE_FLOOR,
            outstanding: OUTSTANDING_COVERAGE,
        }
    }
}

/// Spread thresholds on the standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadThresholds {
    pub homogeneous_below: f64,
    pub moderate_below: f64,
}

impl Default for SpreadThresholds {
    fn default() -> Self {
        Self {
            homogeneous_below: HOMOGENEOUS_SPREAD_BELOW,
            moderate_below: MODERATE_SPREAD_BELOW,
        }
    }
}

/// Tier of a mean (or single) coverage value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    /// At or above target
    Optimal,
    /// Between the moderate floor and the target
    Moderate,
    /// Below the moderate floor
    Low,
}

impl CoverageTier {
    /// Classify with the default thresholds
    pub fn classify(coverage: f64) -> Self {
        Self::classify_with(coverage, &CoverageThresholds::default())
    }

    /// Classify with explicit thresholds
    pub fn classify_with(coverage: f64, thresholds: &CoverageThresholds) -> Self {
        if coverage >= thresholds.target {
            CoverageTier::Optimal
        } else if coverage >= thresholds.moderate_floor {
            CoverageTier::Moderate
        } else {
            CoverageTier::Low
        }
    }

    /// Get the tier name
    pub fn name(&self) -> &'static str {
        match self {
            CoverageTier::Optimal => "optimal",
            CoverageTier::Moderate => "moderate",
            CoverageTier::Low => "low",
        }
    }
}

/// Tier of a standard deviation across departments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadTier {
    Homogeneous,
    ModerateSpread,
    HighSpread,
}

impl SpreadTier {
    /// Classify with the default thresholds
    pub fn classify(std_dev: f64) -> Self {
        Self::classify_with(std_dev, &SpreadThresholds::default())
    }

    /// Classify with explicit thresholds
    pub fn classify_with(std_dev: f64, thresholds: &SpreadThresholds) -> Self {
        if std_dev < thresholds.homogeneous_below {
            SpreadTier::Homogeneous
        } else if std_dev < thresholds.moderate_below {
            SpreadTier::ModerateSpread
        } else {
            SpreadTier::HighSpread
        }
    }

    /// Get the tier name
    pub fn name(&self) -> &'static str {
        match self {
            SpreadTier::Homogeneous => "homogeneous",
            SpreadTier::ModerateSpread => "moderate spread",
            SpreadTier::HighSpread => "high spread",
        }
    }
}

/// Tier of the best (maximum) coverage in a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakTier {
    /// At least one case reaches the outstanding level
    Outstanding,
    /// At least one case meets the target
    MeetsTarget,
    /// No case reaches the target
    BelowTarget,
}

impl PeakTier {
    pub fn classify_with(max: f64, thresholds: &CoverageThresholds) -> Self {
        if max >= thresholds.outstanding {
            PeakTier::Outstanding
        } else if max >= thresholds.target {
            PeakTier::MeetsTarget
        } else {
            PeakTier::BelowTarget
        }
    }
}

/// Tier of the worst (minimum) coverage in a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorTier {
    Acceptable,
    AtRisk,
    Critical,
}

impl FloorTier {
    pub fn classify_with(min: f64, thresholds: &CoverageThresholds) -> Self {
        if min >= thresholds.moderate_floor {
            FloorTier::Acceptable
        } else if min >= thresholds.critical_floor {
            FloorTier::AtRisk
        } else {
            FloorTier::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, CoverageTier::Optimal)]
    #[case(95.0, CoverageTier::Optimal)]
    #[case(94.99, CoverageTier::Moderate)]
    #[case(80.0, CoverageTier::Moderate)]
    #[case(79.99, CoverageTier::Low)]
    #[case(0.0, CoverageTier::Low)]
    fn test_coverage_tier(#[case] coverage: f64, #[case] expected: CoverageTier) {
        assert_eq!(CoverageTier::classify(coverage), expected);
    }

    #[rstest]
    #[case(0.0, SpreadTier::Homogeneous)]
    #[case(4.99, SpreadTier::Homogeneous)]
    #[case(5.0, SpreadTier::ModerateSpread)]
    #[case(9.99, SpreadTier::ModerateSpread)]
    #[case(10.0, SpreadTier::HighSpread)]
    fn test_spread_tier(#[case] std_dev: f64, #[case] expected: SpreadTier) {
        assert_eq!(SpreadTier::classify(std_dev), expected);
    }

    #[rstest]
    #[case(104.2, PeakTier::Outstanding)]
    #[case(100.0, PeakTier::Outstanding)]
    #[case(96.0, PeakTier::MeetsTarget)]
    #[case(90.0, PeakTier::BelowTarget)]
    fn test_peak_tier(#[case] max: f64, #[case] expected: PeakTier) {
        assert_eq!(PeakTier::classify_with(max, &CoverageThresholds::default()), expected);
    }

    #[rstest]
    #[case(85.0, FloorTier::Acceptable)]
    #[case(80.0, FloorTier::Acceptable)]
    #[case(65.0, FloorTier::AtRisk)]
    #[case(59.9, FloorTier::Critical)]
    fn test_floor_tier(#[case] min: f64, #[case] expected: FloorTier) {
        assert_eq!(FloorTier::classify_with(min, &CoverageThresholds::default()), expected);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = CoverageThresholds {
            target: 90.0,
            ..Default::default()
        };
        assert_eq!(CoverageTier::classify_with(92.0, &thresholds), CoverageTier::Optimal);
        assert_eq!(CoverageTier::classify(92.0), CoverageTier::Moderate);
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(CoverageTier::Optimal.name(), "optimal");
        assert_eq!(SpreadTier::ModerateSpread.name(), "moderate spread");
    }
}
