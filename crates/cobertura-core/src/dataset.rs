//! Loaded dataset and load state
//!
//! A [`CoverageDataset`] is the immutable snapshot every view reads from:
//! the coverage table, the PDET classification and the analysis
//! configuration. [`LoadState`] tracks whether that snapshot exists yet.

use crate::catalog::Indicator;
use crate::config::AnalysisConfig;
use crate::error::{CoberturaError, CoberturaResult};
use crate::region::PdetClassification;
use crate::selection::Group;
use crate::table::CoverageTable;
use cobertura_io::LoadedCoverage;
use std::sync::Arc;

/// Coverage table, PDET grouping and configuration of one session
#[derive(Debug, Clone)]
pub struct CoverageDataset {
    pub table: CoverageTable,
    pub classification: PdetClassification,
    pub config: AnalysisConfig,
}

impl CoverageDataset {
    /// Assemble a dataset from already-built parts
    pub fn new(
        table: CoverageTable,
        classification: PdetClassification,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            table,
            classification,
            config,
        }
    }

    /// Build the table and classification from loader output
    pub fn from_sources<M: AsRef<str>>(
        loaded: LoadedCoverage,
        municipality_departments: &[M],
        config: AnalysisConfig,
    ) -> CoberturaResult<Self> {
        config.validate()?;
        let table = CoverageTable::from_loaded(loaded)?;
        let classification = PdetClassification::classify_with_threshold(
            municipality_departments,
            table.departments(),
            config.pdet.high_concentration_min,
        );
        Ok(Self::new(table, classification, config))
    }

    /// Values of one group over some years, dropping absent cells
    pub fn group_values<Y: AsRef<str>>(
        &self,
        group: Group,
        years: &[Y],
        indicator: &Indicator,
    ) -> Vec<f64> {
        let members = self.classification.members(group);
        self.table.values_for(&members, years, indicator)
    }
}

/// Whether the session's data is available
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Loading has not finished
    #[default]
    Pending,
    /// Dataset built and ready for views
    Ready(Arc<CoverageDataset>),
    /// Loading failed; the message is shown instead of every view
    Unavailable(String),
}

impl LoadState {
    /// Terminal state for the outcome of a load
    pub fn from_result(result: CoberturaResult<CoverageDataset>) -> Self {
        match result {
            Ok(dataset) => LoadState::Ready(Arc::new(dataset)),
            Err(e) => {
                tracing::warn!("Coverage data unavailable: {}", e);
                LoadState::Unavailable(e.to_string())
            }
        }
    }

    /// Whether views can be evaluated
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    /// Evaluate a view, `None` unless ready
    pub fn view<T>(&self, f: impl FnOnce(&CoverageDataset) -> T) -> Option<T> {
        match self {
            LoadState::Ready(dataset) => Some(f(dataset)),
            _ => None,
        }
    }

    /// The dataset, or the reason it is missing
    pub fn dataset(&self) -> CoberturaResult<Arc<CoverageDataset>> {
        match self {
            LoadState::Ready(dataset) => Ok(Arc::clone(dataset)),
            LoadState::Pending => Err(CoberturaError::NotLoaded),
            LoadState::Unavailable(message) => Err(CoberturaError::DataUnavailable(message.clone())),
        }
    }
}
