//! Sheet and row types for loaded workbooks

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Column holding the department name
pub const DEPARTMENT_COLUMN: &str = "DEPARTAMENTOS";

/// Column holding the department code
pub const DEPARTMENT_CODE_COLUMN: &str = "CODEP";

/// Label of the national aggregate row
pub const TOTAL_ROW: &str = "TOTAL";

/// Columns that identify a row rather than measure coverage
pub const IDENTIFIER_COLUMNS: [&str; 2] = [DEPARTMENT_CODE_COLUMN, DEPARTMENT_COLUMN];

/// Target-population columns, excluded from indicators
pub const TARGET_POPULATION_COLUMNS: [&str; 2] =
    ["Población Menor 1 año (Meta", "Población 5 años (Meta"];

/// One row of a sheet: column name to raw cell text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    cells: HashMap<String, Option<String>>,
}

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell; blank text is stored as absent
    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        self.cells.insert(column.into(), value);
    }

    /// Builder form of [`RawRow::insert`]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, Some(value.into()));
        self
    }

    /// Get the raw text of a cell, `None` when absent or blank
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|v| v.as_deref())
    }

    /// Whether the column exists in this row (even if blank)
    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Department name, trimmed
    pub fn department(&self) -> Option<&str> {
        self.get(DEPARTMENT_COLUMN).map(str::trim)
    }

    /// Whether this is the national aggregate row
    pub fn is_total(&self) -> bool {
        self.department()
            .map(|d| d.eq_ignore_ascii_case(TOTAL_ROW))
            .unwrap_or(false)
    }

    /// Iterate over `(column, raw value)` pairs
    pub fn cells(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// A sheet of a workbook (one year)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name, the year label
    pub name: String,

    /// Column names in source order
    pub columns: Vec<String>,

    /// Data rows
    pub rows: Vec<RawRow>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row
    pub fn push(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A fully loaded coverage workbook
///
/// Mirrors the loader output consumed by the analysis core: rows keyed by
/// year label, the candidate indicator columns, the year labels in sheet
/// order, and the department names of the first sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedCoverage {
    pub rows_by_year: BTreeMap<String, Vec<RawRow>>,
    pub indicator_names: Vec<String>,
    pub years: Vec<String>,
    pub departments: Vec<String>,
}

impl LoadedCoverage {
    /// Rows of one year
    pub fn rows(&self, year: &str) -> Option<&[RawRow]> {
        self.rows_by_year.get(year).map(Vec::as_slice)
    }
}
