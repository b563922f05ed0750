//! Coverage table
//!
//! The normalized in-memory form of a loaded workbook: for each year, one
//! row per department with every cell kept as raw text plus its parsed
//! value. Built once and never mutated.

use crate::catalog::{Indicator, IndicatorCatalog};
use crate::error::{CoberturaError, CoberturaResult, TableError};
use cobertura_io::{parse_cell, LoadedCoverage, RawRow, DEPARTMENT_CODE_COLUMN};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A cell: raw text and its normalized number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageCell {
    pub raw: Option<String>,
    pub value: Option<f64>,
}

impl CoverageCell {
    fn from_raw(raw: Option<&str>) -> Self {
        Self {
            raw: raw.map(str::to_string),
            value: parse_cell(raw),
        }
    }
}

/// One department's record for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRow {
    department: String,
    code: Option<String>,
    cells: HashMap<String, CoverageCell>,
}

impl CoverageRow {
    /// Build from a raw row; `None` without a department name
    pub fn from_raw(raw: &RawRow) -> Option<Self> {
        let department = raw.department()?.to_string();
        let code = raw.get(DEPARTMENT_CODE_COLUMN).map(|c| c.trim().to_string());
        let cells = raw
            .cells()
            .map(|(column, value)| (column.trim().to_string(), CoverageCell::from_raw(value)))
            .collect();

        Some(Self {
            department,
            code,
            cells,
        })
    }

    /// Department name
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Department code, when present
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Cell of a column
    pub fn cell(&self, column: &str) -> Option<&CoverageCell> {
        self.cells.get(column)
    }

    /// Coverage value of an indicator, `None` when absent or unparseable
    pub fn value(&self, indicator: &Indicator) -> Option<f64> {
        self.cells.get(indicator.column()).and_then(|c| c.value)
    }
}

/// Rows of one year with a department index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct YearRows {
    rows: Vec<CoverageRow>,
    index: HashMap<String, usize>,
    total: Option<CoverageRow>,
}

/// Per-year coverage rows keyed by department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageTable {
    years: Vec<String>,
    departments: Vec<String>,
    rows_by_year: BTreeMap<String, YearRows>,
    catalog: IndicatorCatalog,
}

impl CoverageTable {
    /// Build the table from loaded workbook data
    ///
    /// Every year must list exactly the departments of the loaded
    /// department list; the `TOTAL` row is kept apart.
    pub fn from_loaded(loaded: LoadedCoverage) -> CoberturaResult<Self> {
        if loaded.years.is_empty() {
            return Err(TableError::NoYears.into());
        }

        let expected: HashSet<&str> = loaded.departments.iter().map(String::as_str).collect();
        let mut rows_by_year = BTreeMap::new();

        for year in &loaded.years {
            let raw_rows = loaded
                .rows(year)
                .ok_or_else(|| TableError::MissingYear { year: year.clone() })?;

            let mut year_rows = YearRows::default();
            for raw in raw_rows {
                let Some(row) = CoverageRow::from_raw(raw) else {
                    tracing::warn!("Skipping row without department in {}", year);
                    continue;
                };
                if raw.is_total() {
                    year_rows.total = Some(row);
                    continue;
                }
                if year_rows.index.contains_key(row.department()) {
                    return Err(TableError::DuplicateDepartment {
                        year: year.clone(),
                        department: row.department().to_string(),
                    }
                    .into());
                }
                year_rows
                    .index
                    .insert(row.department().to_string(), year_rows.rows.len());
                year_rows.rows.push(row);
            }

            check_departments(year, &expected, &year_rows)?;
            rows_by_year.insert(year.clone(), year_rows);
        }

        let catalog = IndicatorCatalog::derive(&loaded.indicator_names);
        tracing::info!(
            "Built coverage table: {} years, {} departments, {} indicators",
            loaded.years.len(),
            loaded.departments.len(),
            catalog.len()
        );

        Ok(Self {
            years: loaded.years,
            departments: loaded.departments,
            rows_by_year,
            catalog,
        })
    }

    /// Year labels in source order
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// Latest year label
    pub fn latest_year(&self) -> Option<&str> {
        self.years.last().map(String::as_str)
    }

    /// Department names, `TOTAL` excluded
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Indicator catalog
    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    /// Resolve an indicator name against the catalog
    pub fn resolve_indicator(&self, name: &str) -> CoberturaResult<Indicator> {
        self.catalog.resolve(name).cloned()
    }

    /// Whether a year label exists
    pub fn has_year(&self, year: &str) -> bool {
        self.rows_by_year.contains_key(year)
    }

    /// Fail with `UnknownYear` unless the year exists
    pub fn check_year(&self, year: &str) -> CoberturaResult<()> {
        if self.has_year(year) {
            Ok(())
        } else {
            Err(CoberturaError::UnknownYear(year.to_string()))
        }
    }

    /// Row of one department in one year
    pub fn row_for(&self, year: &str, department: &str) -> Option<&CoverageRow> {
        let year_rows = self.rows_by_year.get(year)?;
        let &i = year_rows.index.get(department.trim())?;
        year_rows.rows.get(i)
    }

    /// Department rows of one year in source order
    pub fn rows(&self, year: &str) -> &[CoverageRow] {
        self.rows_by_year
            .get(year)
            .map(|y| y.rows.as_slice())
            .unwrap_or(&[])
    }

    /// National aggregate row of one year
    pub fn total_row(&self, year: &str) -> Option<&CoverageRow> {
        self.rows_by_year.get(year)?.total.as_ref()
    }

    /// Coverage value of one department, year and indicator
    pub fn value(&self, year: &str, department: &str, indicator: &Indicator) -> Option<f64> {
        self.row_for(year, department)?.value(indicator)
    }

    /// Observed values for the cross product of years and departments
    ///
    /// Outer loop by year, inner loop by department. Missing rows, absent
    /// cells and unparseable text are dropped, not counted as zero.
    pub fn values_for<D, Y>(&self, departments: &[D], years: &[Y], indicator: &Indicator) -> Vec<f64>
    where
        D: AsRef<str>,
        Y: AsRef<str>,
    {
        years
            .iter()
            .flat_map(|year| {
                departments
                    .iter()
                    .filter_map(move |dep| self.value(year.as_ref(), dep.as_ref(), indicator))
            })
            .collect()
    }
}

fn check_departments(
    year: &str,
    expected: &HashSet<&str>,
    year_rows: &YearRows,
) -> Result<(), TableError> {
    let actual: HashSet<&str> = year_rows.index.keys().map(String::as_str).collect();
    if &actual == expected {
        return Ok(());
    }

    let mut missing: Vec<String> = expected.difference(&actual).map(|s| s.to_string()).collect();
    let mut unexpected: Vec<String> = actual.difference(expected).map(|s| s.to_string()).collect();
    missing.sort();
    unexpected.sort();

    Err(TableError::InconsistentDepartments {
        year: year.to_string(),
        missing,
        unexpected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobertura_io::{from_sheets, Sheet, DEPARTMENT_COLUMN};

    fn sheet(year: &str, rows: &[(&str, Option<&str>)]) -> Sheet {
        let mut sheet = Sheet::new(
            year,
            vec![
                DEPARTMENT_COLUMN.to_string(),
                "BCG".to_string(),
                "BCG%".to_string(),
            ],
        );
        for (dept, value) in rows {
            let mut row = RawRow::new().with(DEPARTMENT_COLUMN, *dept);
            row.insert("BCG%", value.map(str::to_string));
            sheet.push(row);
        }
        sheet
    }

    fn table() -> CoverageTable {
        let loaded = from_sheets(vec![
            sheet(
                "2014",
                &[
                    ("AMAZONAS", Some("95,5")),
                    ("CHOCO", Some("70.25")),
                    ("TOTAL", Some("90")),
                ],
            ),
            sheet("2015", &[("AMAZONAS", Some("n/d")), ("CHOCO", None)]),
            sheet("2016", &[("CHOCO", Some("82")), ("AMAZONAS", Some("99"))]),
        ])
        .unwrap();
        CoverageTable::from_loaded(loaded).unwrap()
    }

    #[test]
    fn test_row_lookup() {
        let table = table();
        let bcg = table.resolve_indicator("BCG").unwrap();

        let row = table.row_for("2014", "AMAZONAS").unwrap();
        assert_eq!(row.value(&bcg), Some(95.5));
        assert_eq!(row.cell("BCG%").unwrap().raw.as_deref(), Some("95,5"));

        assert!(table.row_for("2014", "TOTAL").is_none());
        assert!(table.row_for("2020", "AMAZONAS").is_none());
        assert!(table.row_for("2014", "GUAINIA").is_none());
        assert_eq!(table.total_row("2014").unwrap().value(&bcg), Some(90.0));
    }

    #[test]
    fn test_values_for_order_and_drops() {
        let table = table();
        let bcg = table.resolve_indicator("BCG").unwrap();

        let values = table.values_for(
            &["CHOCO", "AMAZONAS", "GUAINIA"],
            &["2014", "2015", "2016", "2020"],
            &bcg,
        );
        assert_eq!(values, vec![70.25, 95.5, 82.0, 99.0]);
    }

    #[test]
    fn test_departments_exclude_total() {
        let table = table();
        assert_eq!(table.departments(), &["AMAZONAS", "CHOCO"]);
        assert_eq!(table.years(), &["2014", "2015", "2016"]);
        assert_eq!(table.latest_year(), Some("2016"));
    }

    #[test]
    fn test_unknown_year_and_indicator() {
        let table = table();
        assert!(table.check_year("2014").is_ok());
        assert!(matches!(
            table.check_year("1999"),
            Err(CoberturaError::UnknownYear(_))
        ));
        assert!(matches!(
            table.resolve_indicator("DPT"),
            Err(CoberturaError::UnknownIndicator(_))
        ));
    }

    #[test]
    fn test_inconsistent_departments() {
        let loaded = from_sheets(vec![
            sheet("2014", &[("AMAZONAS", Some("90")), ("CHOCO", Some("80"))]),
            sheet("2015", &[("AMAZONAS", Some("90")), ("ARAUCA", Some("80"))]),
        ])
        .unwrap();

        match CoverageTable::from_loaded(loaded) {
            Err(CoberturaError::Table(TableError::InconsistentDepartments {
                year,
                missing,
                unexpected,
            })) => {
                assert_eq!(year, "2015");
                assert_eq!(missing, vec!["CHOCO"]);
                assert_eq!(unexpected, vec!["ARAUCA"]);
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_department() {
        let loaded = from_sheets(vec![sheet(
            "2014",
            &[("AMAZONAS", Some("90")), ("AMAZONAS", Some("91"))],
        )])
        .unwrap();
        assert!(matches!(
            CoverageTable::from_loaded(loaded),
            Err(CoberturaError::Table(TableError::DuplicateDepartment { .. }))
        ));
    }
}
