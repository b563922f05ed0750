//! Configuration for cobertura-core
//!
//! Every policy constant of the analysis (PDET threshold, trend margin,
//! coverage and spread tiers, test levels, period years, ranking size) is
//! grouped here. Defaults reproduce the dashboard's fixed policy.

use crate::error::{CoberturaError, CoberturaResult};
use crate::region::HIGH_CONCENTRATION_MIN;
use cobertura_stats::{
    CoverageThresholds, SpreadThresholds, CONFIDENCE_LEVEL, SIGNIFICANCE_LEVEL, STABLE_MARGIN,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Years before the 2016 peace agreement
pub const YEARS_BEFORE_AGREEMENT: [&str; 3] = ["2014", "2015", "2016"];

/// Years after the 2016 peace agreement
pub const YEARS_AFTER_AGREEMENT: [&str; 3] = ["2017", "2018", "2019"];

/// Default size of top-N rankings
pub const DEFAULT_TOP_N: usize = 5;

/// Analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// PDET grouping policy
    pub pdet: PdetConfig,
    /// Trend classification policy
    pub trend: TrendConfig,
    /// Coverage tier thresholds
    pub coverage: CoverageThresholds,
    /// Spread tier thresholds
    pub spread: SpreadThresholds,
    /// Hypothesis test levels
    pub test: TestConfig,
    /// Period year lists
    pub periods: PeriodConfig,
    /// Ranking settings
    pub ranking: RankingConfig,
}

/// PDET grouping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdetConfig {
    /// Minimum number of PDET municipalities for "high concentration"
    pub high_concentration_min: usize,
}

impl Default for PdetConfig {
    fn default() -> Self {
        Self {
            high_concentration_min: HIGH_CONCENTRATION_MIN,
        }
    }
}

/// Trend classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Changes within this many points are "stable"
    pub stable_margin: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_margin: STABLE_MARGIN,
        }
    }
}

/// Hypothesis test configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub significance_level: f64,
    pub confidence_level: f64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            significance_level: SIGNIFICANCE_LEVEL,
            confidence_level: CONFIDENCE_LEVEL,
        }
    }
}

/// Year lists of the analysis periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            before: YEARS_BEFORE_AGREEMENT.iter().map(|y| y.to_string()).collect(),
            after: YEARS_AFTER_AGREEMENT.iter().map(|y| y.to_string()).collect(),
        }
    }
}

/// Ranking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> CoberturaResult<Self> {
        toml::from_str(toml_str).map_err(|e| CoberturaError::InvalidConfig(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> CoberturaResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoberturaError::InvalidConfig(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> CoberturaResult<Self> {
        serde_json::from_str(json_str).map_err(|e| CoberturaError::InvalidConfig(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> CoberturaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoberturaError::InvalidConfig(e.to_string()))
    }

    /// Load and validate a configuration file (`.toml` or `.json`)
    pub fn load(path: impl AsRef<Path>) -> CoberturaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoberturaError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };

        config.validate()?;
        tracing::debug!("Loaded analysis configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> CoberturaResult<()> {
        let invalid = |msg: &str| Err(CoberturaError::InvalidConfig(msg.to_string()));

        if self.pdet.high_concentration_min == 0 {
            return invalid("pdet.high_concentration_min must be positive");
        }

        if !(self.trend.stable_margin >= 0.0 && self.trend.stable_margin.is_finite()) {
            return invalid("trend.stable_margin must be a non-negative number");
        }

        let c = &self.coverage;
        if ![c.critical_floor, c.moderate_floor, c.target, c.outstanding]
            .iter()
            .all(|v| v.is_finite())
        {
            return invalid("coverage thresholds must be finite numbers");
        }
        if !(c.critical_floor <= c.moderate_floor
            && c.moderate_floor <= c.target
            && c.target <= c.outstanding)
        {
            return invalid(
                "coverage thresholds must satisfy critical_floor <= moderate_floor <= target <= outstanding",
            );
        }

        let s = &self.spread;
        if !(s.homogeneous_below.is_finite() && s.moderate_below.is_finite()) {
            return invalid("spread thresholds must be finite numbers");
        }
        if s.homogeneous_below > s.moderate_below {
            return invalid("spread.homogeneous_below must not exceed spread.moderate_below");
        }

        for (name, level) in [
            ("test.significance_level", self.test.significance_level),
            ("test.confidence_level", self.test.confidence_level),
        ] {
            if !(level > 0.0 && level < 1.0) {
                return Err(CoberturaError::InvalidConfig(format!(
                    "{} must be between 0 and 1 (exclusive)",
                    name
                )));
            }
        }

        if self.periods.before.is_empty() || self.periods.after.is_empty() {
            return invalid("periods.before and periods.after must list at least one year");
        }

        if self.ranking.top_n == 0 {
            return invalid("ranking.top_n must be positive");
        }

        Ok(())
    }
}
