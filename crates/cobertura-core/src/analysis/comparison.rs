//! Hypothesis test between PDET groups

use crate::dataset::CoverageDataset;
use crate::error::CoberturaResult;
use crate::selection::{Group, GroupComparisonSelection, Period};
use cobertura_stats::{welch_t_test_with_confidence, ComparisonResult};
use serde::Serialize;
use std::cmp::Ordering;

/// Welch test of high against low PDET concentration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisTest {
    pub period: Period,
    pub label: String,
    pub indicator: String,
    /// Group A is the high concentration group, group B the low one
    pub comparison: ComparisonResult,
    pub significance_level: f64,
    pub significant: bool,
    /// Group with the larger mean, `None` on a tie
    pub higher_group: Option<Group>,
}

impl HypothesisTest {
    /// One-line reading of the result
    pub fn interpretation(&self) -> String {
        let c = &self.comparison;
        if !self.significant {
            return format!(
                "No statistically significant difference between groups (p = {:.2e})",
                c.p_value
            );
        }
        let higher = self
            .higher_group
            .map(|g| g.label())
            .unwrap_or("neither group");
        format!(
            "Statistically significant difference (p = {:.2e}): {:.1} points, {:.0}% CI [{:.1}, {:.1}], higher in the {} group",
            c.p_value,
            c.mean_difference,
            c.confidence_level * 100.0,
            c.ci_low,
            c.ci_high,
            higher
        )
    }
}

/// Run Welch's t-test between the groups for a period and indicator
///
/// `Ok(None)` when either group has fewer than two observations or both
/// groups have zero variance.
pub fn hypothesis_test(
    dataset: &CoverageDataset,
    selection: &GroupComparisonSelection,
) -> CoberturaResult<Option<HypothesisTest>> {
    let indicator = dataset.table.resolve_indicator(&selection.indicator)?;
    let config = &dataset.config;
    let years = selection.period.years(&config.periods);

    let high = dataset.group_values(Group::High, &years, &indicator);
    let low = dataset.group_values(Group::Low, &years, &indicator);

    let Some(comparison) = welch_t_test_with_confidence(&high, &low, config.test.confidence_level)
    else {
        tracing::debug!(
            "No hypothesis test for {}: {} high and {} low observations",
            indicator.name(),
            high.len(),
            low.len()
        );
        return Ok(None);
    };

    let higher_group = match comparison.mean_difference.partial_cmp(&0.0) {
        Some(Ordering::Greater) => Some(Group::High),
        Some(Ordering::Less) => Some(Group::Low),
        _ => None,
    };

    Ok(Some(HypothesisTest {
        period: selection.period,
        label: selection.period.label(&config.periods),
        indicator: indicator.name().to_string(),
        significance_level: config.test.significance_level,
        significant: comparison.is_significant_at(config.test.significance_level),
        higher_group,
        comparison,
    }))
}
