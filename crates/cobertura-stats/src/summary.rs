//! Descriptive statistics for coverage samples
//!
//! Provides the dashboard's summary card values:
//! - Count, mean, population standard deviation
//! - Min, max
//!
//! The standard deviation here divides by n. The hypothesis test uses
//! [`crate::welch::sample_variance`] instead; do not swap them.

use serde::{Deserialize, Serialize};

/// Summary statistics for a coverage sample
///
/// All value fields are `None` when the sample is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Population standard deviation (divide by n)
    pub std_dev: Option<f64>,
    /// Minimum value
    pub min: Option<f64>,
    /// Maximum value
    pub max: Option<f64>,
}

impl StatSummary {
    /// Summary of an empty sample
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std_dev: None,
            min: None,
            max: None,
        }
    }

    /// Whether the sample had no observations
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the range (max - min)
    pub fn range(&self) -> Option<f64> {
        Some(self.max? - self.min?)
    }
}

/// Summarize a sample of coverage values
pub fn summarize(values: &[f64]) -> StatSummary {
    let Some(mean) = mean(values) else {
        return StatSummary::empty();
    };

    let std_dev = population_variance(values).map(f64::sqrt);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    StatSummary {
        count: values.len(),
        mean: Some(mean),
        std_dev,
        min: Some(min),
        max: Some(max),
    }
}

/// Arithmetic mean, `None` for an empty sample
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Population variance: sum of squared deviations divided by n
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    Some(squares / values.len() as f64)
}
