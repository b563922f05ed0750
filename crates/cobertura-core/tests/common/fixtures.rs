//! Test fixture loading utilities

use cobertura_core::{AnalysisConfig, CoverageDataset};
use cobertura_io::{
    load_coverage, open_workbook, read_municipality_departments, LoadedCoverage,
    MUNICIPALITY_DEPARTMENT_COLUMN,
};
use std::path::PathBuf;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a workbook fixture (`workbook` directory or `workbook.json`)
pub fn load_workbook(name: &str) -> LoadedCoverage {
    let reader = open_workbook(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to open fixture {}: {}", name, e));
    load_coverage(reader.as_ref()).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e))
}

/// Department name of every PDET municipality in the fixture list
pub fn load_municipalities() -> Vec<String> {
    read_municipality_departments(
        fixture_path("pdet/municipios_pdet.csv"),
        MUNICIPALITY_DEPARTMENT_COLUMN,
    )
    .unwrap_or_else(|e| panic!("Failed to load PDET fixture: {}", e))
}

/// Dataset built from the CSV workbook fixture
pub fn load_dataset(config: AnalysisConfig) -> CoverageDataset {
    CoverageDataset::from_sources(load_workbook("workbook"), &load_municipalities(), config)
        .unwrap_or_else(|e| panic!("Failed to build dataset: {}", e))
}

#[allow(dead_code)]
pub fn default_dataset() -> CoverageDataset {
    load_dataset(AnalysisConfig::default())
}
