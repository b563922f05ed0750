//! cobertura-io - Loading of vaccination coverage workbooks
//!
//! This crate is the loader collaborator for the analysis core. It reads:
//!
//! - **Coverage workbooks**: one sheet per year, one row per department
//!   - a directory of `<year>.csv` files
//!   - a JSON document mapping year labels to row arrays
//! - **PDET municipality lists**: one row per priority municipality, with
//!   the department it belongs to
//!
//! # Design
//!
//! All workbook formats implement the `WorkbookReader` trait and are reduced
//! to the same `LoadedCoverage` value. Cells keep their raw text; the only
//! numeric interpretation done here is [`parse_coverage`], shared with the
//! core so decimal commas are handled in one place.

pub mod loader;
pub mod reader;
pub mod schema;
pub mod value;

#[cfg(feature = "csv")]
pub mod csv_reader;

#[cfg(feature = "json")]
pub mod json_reader;

pub use loader::*;
pub use reader::*;
pub use schema::*;
pub use value::*;

#[cfg(feature = "csv")]
pub use csv_reader::*;

#[cfg(feature = "json")]
pub use json_reader::*;
