//! Workbook reader trait and error types
//!
//! The `WorkbookReader` trait provides a uniform interface for reading
//! per-year coverage sheets from the supported formats.

use crate::schema::Sheet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading source data
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook has no sheets: {0}")]
    EmptyWorkbook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for loading operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for reading per-year sheets of a coverage workbook
pub trait WorkbookReader: Send + Sync {
    /// Sheet names (year labels) in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet by name
    fn read_sheet(&self, name: &str) -> IoResult<Sheet>;

    /// Get the source path (if applicable)
    fn path(&self) -> Option<&str> {
        None
    }

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed reader for dynamic dispatch
pub type BoxedWorkbook = Box<dyn WorkbookReader>;

/// Open a workbook and return an appropriate reader
///
/// A directory is read as one CSV file per sheet; a file is selected by
/// its extension.
pub fn open_workbook(path: impl AsRef<Path>) -> IoResult<BoxedWorkbook> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    #[cfg(feature = "csv")]
    if path.is_dir() {
        use crate::csv_reader::CsvWorkbook;
        return Ok(Box::new(CsvWorkbook::open(path)?));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "json")]
        "json" => {
            use crate::json_reader::JsonWorkbook;
            Ok(Box::new(JsonWorkbook::open(path)?))
        }

        _ => Err(IoError::InvalidFormat(format!(
            "Unsupported workbook: {}",
            path.display()
        ))),
    }
}

/// List supported workbook sources
pub fn supported_sources() -> Vec<&'static str> {
    let mut sources = Vec::new();

    #[cfg(feature = "csv")]
    sources.push("directory of csv sheets");

    #[cfg(feature = "json")]
    sources.push("json");

    sources
}
