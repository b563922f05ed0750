//! cobertura-core - Analysis core for vaccination coverage in Colombian departments
//!
//! This crate turns loaded coverage workbooks (2014 to 2019, one sheet per
//! year) into the values shown by the coverage dashboard, comparing
//! departments with high and low concentration of PDET municipalities.
//!
//! # Key Components
//!
//! - **CoverageTable**: per-year department rows with raw and parsed cells
//! - **IndicatorCatalog**: vaccine indicators resolved once to their columns
//! - **PdetClassification**: high/low PDET concentration partition
//! - **CoverageDataset**: the immutable snapshot every view reads
//! - **LoadState**: pending, ready or unavailable data for a session
//! - **Analysis views**: global statistics, group summaries, hypothesis
//!   test, gap trend, department series and rankings
//!
//! # Selections
//!
//! Views are pure `(dataset, selection) -> result` functions. There is no
//! shared selection state: the caller passes a [`GlobalSelection`],
//! [`GroupComparisonSelection`] or [`RankingSelection`] and evaluates the
//! view again whenever the selection changes.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod region;
pub mod selection;
pub mod table;

pub use analysis::*;
pub use catalog::*;
pub use config::*;
pub use dataset::*;
pub use error::*;
pub use region::*;
pub use selection::*;
pub use table::*;
