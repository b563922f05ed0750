//! cobertura-stats - Statistical primitives for vaccination coverage analysis
//!
//! This crate provides the numeric core used by the dashboard views:
//!
//! - **Summary**: count, mean, population standard deviation, min and max
//! - **Welch**: unequal-variance two-sample t-test with a confidence interval,
//!   using the Student-t distribution from `statrs`
//! - **Tiers**: fixed coverage and spread classification policies
//! - **Trend**: first-vs-last direction with a noise margin, gap to target
//!
//! # Design Philosophy
//!
//! Every function is total. Empty input yields an explicit "no data" value
//! (`None`), never NaN and never a panic. Population variance (descriptive
//! summaries) and sample variance (hypothesis test) are kept as separately
//! named functions so one is never used in place of the other.

pub mod summary;
pub mod tiers;
pub mod trend;
pub mod welch;

pub use summary::*;
pub use tiers::*;
pub use trend::*;
pub use welch::*;
