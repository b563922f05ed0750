//! Error types for cobertura-core
//!
//! Missing values and empty samples are not errors; they surface as
//! absent values in results. Errors cover:
//! - Source loading failures
//! - Coverage table invariants
//! - Unknown selections (indicator, year)
//! - Configuration problems

use cobertura_io::IoError;
use thiserror::Error;

/// Main error type for cobertura operations
#[derive(Error, Debug)]
pub enum CoberturaError {
    /// Source data could not be loaded
    #[error("Failed to load source data: {0}")]
    Load(#[from] IoError),

    /// The loaded data violates a table invariant
    #[error("Invalid coverage table: {0}")]
    Table(#[from] TableError),

    /// Indicator name not present in the catalog
    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    /// Year label not present in the table
    #[error("Unknown year: {0}")]
    UnknownYear(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Data is still loading
    #[error("Data not loaded yet")]
    NotLoaded,

    /// Data failed to load earlier in the session
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
}

/// Errors related to coverage table construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// The workbook contains no years
    #[error("coverage table has no years")]
    NoYears,

    /// A year lists no rows at all
    #[error("year {year} has no rows")]
    MissingYear { year: String },

    /// A department appears twice in one year
    #[error("department '{department}' appears more than once in {year}")]
    DuplicateDepartment { year: String, department: String },

    /// A year does not share the department set of the first year
    #[error("year {year} departments differ: missing {missing:?}, unexpected {unexpected:?}")]
    InconsistentDepartments {
        year: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

/// Result type alias for cobertura operations
pub type CoberturaResult<T> = Result<T, CoberturaError>;
