//! Indicator catalog
//!
//! Source sheets carry each vaccine twice: the dose count under its name
//! and the coverage percentage under the same name with a `%` suffix. The
//! catalog lists each vaccine once and records which column holds its
//! coverage, so views never build column names by string concatenation.

use crate::error::{CoberturaError, CoberturaResult};
use cobertura_io::is_excluded_column;
use serde::{Deserialize, Serialize};

const PERCENT_SUFFIX: char = '%';

/// A coverage indicator resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Indicator {
    name: String,
    column: String,
}

impl Indicator {
    /// Display name (without the `%` suffix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column holding the coverage percentage
    pub fn column(&self) -> &str {
        &self.column
    }
}

/// The set of indicators available in a coverage table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCatalog {
    indicators: Vec<Indicator>,
}

impl IndicatorCatalog {
    /// Derive the catalog from the first sheet's column names
    pub fn derive(columns: &[String]) -> Self {
        let candidates: Vec<&str> = columns
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty() && !is_excluded_column(c))
            .collect();

        let mut indicators: Vec<Indicator> = Vec::new();
        for &column in &candidates {
            let indicator = match column.strip_suffix(PERCENT_SUFFIX) {
                Some(base) => {
                    let base = base.trim_end();
                    if candidates.contains(&base) {
                        // Listed through its base column
                        continue;
                    }
                    Indicator {
                        name: base.to_string(),
                        column: column.to_string(),
                    }
                }
                None => {
                    let percent = candidates
                        .iter()
                        .find(|c| is_percent_of(c, column))
                        .copied()
                        .unwrap_or(column);
                    Indicator {
                        name: column.to_string(),
                        column: percent.to_string(),
                    }
                }
            };

            if !indicators.iter().any(|i| i.name == indicator.name) {
                indicators.push(indicator);
            }
        }

        Self { indicators }
    }

    /// Resolve a name to an indicator
    ///
    /// Accepts the display name or the coverage column name.
    pub fn resolve(&self, name: &str) -> CoberturaResult<&Indicator> {
        let name = name.trim();
        self.indicators
            .iter()
            .find(|i| i.name == name || i.column == name)
            .ok_or_else(|| CoberturaError::UnknownIndicator(name.to_string()))
    }

    /// Iterate over indicators in source order
    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter()
    }

    /// Indicator display names
    pub fn names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name.as_str()).collect()
    }

    /// Number of indicators
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

/// Whether `candidate` is `base` followed by a `%` suffix
fn is_percent_of(candidate: &str, base: &str) -> bool {
    candidate
        .strip_suffix(PERCENT_SUFFIX)
        .map(|b| b.trim_end() == base)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_percentage_duplicates_collapse() {
        let catalog = IndicatorCatalog::derive(&columns(&[
            "CODEP",
            "DEPARTAMENTOS",
            "Población Menor 1 año (Meta",
            "BCG",
            "BCG%",
            "SRP (T.V.) DE UN AÑO",
            "SRP (T.V.) DE UN AÑO%",
        ]));

        assert_eq!(catalog.names(), vec!["BCG", "SRP (T.V.) DE UN AÑO"]);
        assert_eq!(catalog.resolve("BCG").unwrap().column(), "BCG%");
    }

    #[test]
    fn test_resolve_by_column_name() {
        let catalog = IndicatorCatalog::derive(&columns(&["BCG", "BCG%"]));
        let indicator = catalog.resolve("BCG%").unwrap();
        assert_eq!(indicator.name(), "BCG");
    }

    #[test]
    fn test_percent_only_column() {
        let catalog = IndicatorCatalog::derive(&columns(&["DEPARTAMENTOS", "HB%"]));
        let indicator = catalog.resolve("HB").unwrap();
        assert_eq!(indicator.column(), "HB%");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_column_without_percent_counterpart() {
        let catalog = IndicatorCatalog::derive(&columns(&["Penta 3as"]));
        assert_eq!(catalog.resolve("Penta 3as").unwrap().column(), "Penta 3as");
    }

    #[test]
    fn test_unknown_indicator() {
        let catalog = IndicatorCatalog::derive(&columns(&["BCG", "BCG%"]));
        assert!(matches!(
            catalog.resolve("DPT"),
            Err(CoberturaError::UnknownIndicator(_))
        ));
        assert!(catalog.resolve("DEPARTAMENTOS").is_err());
    }
}
