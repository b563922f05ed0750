//! Welch's unequal-variance two-sample t-test
//!
//! Compares the means of two coverage samples without assuming equal
//! variances. Degrees of freedom follow Welch–Satterthwaite and may be
//! fractional; the p-value is two-tailed.

use crate::summary::mean;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// p-value below which a difference is reported as significant
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Confidence level of the interval for the difference of means
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Result of a two-sample comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Mean of the first group
    pub mean_a: f64,
    /// Mean of the second group
    pub mean_b: f64,
    /// Observations in the first group
    pub n_a: usize,
    /// Observations in the second group
    pub n_b: usize,
    /// Welch t statistic
    pub t_statistic: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// `mean_a - mean_b`
    pub mean_difference: f64,
    /// Lower bound of the confidence interval for the difference
    pub ci_low: f64,
    /// Upper bound of the confidence interval for the difference
    pub ci_high: f64,
    /// Confidence level of `[ci_low, ci_high]`
    pub confidence_level: f64,
}

impl ComparisonResult {
    /// Whether the p-value falls below `alpha`
    pub fn is_significant_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Whether the difference is significant at [`SIGNIFICANCE_LEVEL`]
    pub fn is_significant(&self) -> bool {
        self.is_significant_at(SIGNIFICANCE_LEVEL)
    }

    /// Whether the confidence interval excludes zero
    pub fn interval_excludes_zero(&self) -> bool {
        self.ci_low > 0.0 || self.ci_high < 0.0
    }
}

/// Sample variance: sum of squared deviations divided by n - 1
///
/// `None` for fewer than two observations.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    Some(squares / (values.len() - 1) as f64)
}

/// Welch's t-test at the default 95% confidence level
pub fn welch_t_test(group_a: &[f64], group_b: &[f64]) -> Option<ComparisonResult> {
    welch_t_test_with_confidence(group_a, group_b, CONFIDENCE_LEVEL)
}

/// Welch's t-test with a custom confidence level for the interval
///
/// Returns `None` when either group has fewer than two observations,
/// when both groups have zero variance, or when `confidence` is not in
/// (0, 1).
pub fn welch_t_test_with_confidence(
    group_a: &[f64],
    group_b: &[f64],
    confidence: f64,
) -> Option<ComparisonResult> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return None;
    }

    let n_a = group_a.len();
    let n_b = group_b.len();
    let mean_a = mean(group_a)?;
    let mean_b = mean(group_b)?;
    let var_a = sample_variance(group_a)?;
    let var_b = sample_variance(group_b)?;

    let term_a = var_a / n_a as f64;
    let term_b = var_b / n_b as f64;
    let pooled = term_a + term_b;
    if pooled <= 0.0 {
        return None;
    }

    let se = pooled.sqrt();
    let mean_difference = mean_a - mean_b;
    let t_statistic = mean_difference / se;

    let df = pooled.powi(2)
        / (term_a.powi(2) / (n_a - 1) as f64 + term_b.powi(2) / (n_b - 1) as f64);
    if !df.is_finite() {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;

    let p_value = (2.0 * dist.sf(t_statistic.abs())).min(1.0);
    let t_crit = dist.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);
    let margin = t_crit * se;

    Some(ComparisonResult {
        mean_a,
        mean_b,
        n_a,
        n_b,
        t_statistic,
        degrees_of_freedom: df,
        p_value,
        mean_difference,
        ci_low: mean_difference - margin,
        ci_high: mean_difference + margin,
        confidence_level: confidence,
    })
}
