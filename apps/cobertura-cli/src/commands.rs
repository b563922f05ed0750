//! Command definitions and dispatch

use clap::{Parser, Subcommand, ValueEnum};
use cobertura_core::{
    below_target, coverage_gap_trend, department_series, global_statistics, group_period_summaries,
    hypothesis_test, period_means, top_departments, top_indicators, yearly_group_means,
    AnalysisConfig, CoberturaResult, CoverageDataset, GlobalSelection, GroupComparisonSelection,
    IndicatorFilter, LoadState, Period, Ranking, RankingSelection, YearFilter,
};
use cobertura_io::{
    load_coverage, open_workbook, read_municipality_departments, MUNICIPALITY_DEPARTMENT_COLUMN,
};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Vaccination coverage dashboard for Colombian departments
#[derive(Parser, Debug)]
#[command(name = "cobertura", version, about)]
pub struct Cli {
    /// Coverage workbook: a directory of <year>.csv sheets or a JSON file
    #[arg(long)]
    pub data: PathBuf,

    /// PDET municipality list (CSV, one row per municipality)
    #[arg(long)]
    pub pdet: PathBuf,

    /// Column of the PDET list holding the department name
    #[arg(long, default_value = MUNICIPALITY_DEPARTMENT_COLUMN)]
    pub pdet_column: String,

    /// Analysis configuration (TOML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Global statistics over departments, years and indicators
    Summary {
        /// Restrict to one year (all years when omitted)
        #[arg(long)]
        year: Option<String>,
        /// Restrict to one indicator (all indicators when omitted)
        #[arg(long)]
        indicator: Option<String>,
    },
    /// Min, mean and max of each PDET group per period
    Groups {
        #[arg(long)]
        indicator: String,
    },
    /// Mean of each PDET group per period
    Means {
        #[arg(long)]
        indicator: String,
    },
    /// Mean of each PDET group per year
    History {
        #[arg(long)]
        indicator: String,
    },
    /// Yearly gap to the coverage target per PDET group
    Gap {
        #[arg(long)]
        indicator: String,
    },
    /// Welch's t-test between PDET groups
    Test {
        #[arg(long)]
        indicator: String,
        #[arg(long, value_enum, default_value_t = PeriodArg::Both)]
        period: PeriodArg,
    },
    /// Yearly values and trend of one department
    Series {
        #[arg(long)]
        department: String,
        #[arg(long)]
        indicator: String,
    },
    /// Departments ranked by coverage
    TopDepartments {
        #[arg(long)]
        year: String,
        #[arg(long)]
        indicator: String,
        /// Rank from the lowest coverage instead of the highest
        #[arg(long)]
        lowest: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Indicators of one department ranked by coverage
    TopIndicators {
        #[arg(long)]
        year: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        lowest: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Departments below the coverage target in the latest year
    BelowTarget {
        #[arg(long)]
        indicator: String,
    },
    /// PDET concentration of every department
    Classification,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodArg {
    Before,
    After,
    Both,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Before => Period::Before,
            PeriodArg::After => Period::After,
            PeriodArg::Both => Period::Both,
        }
    }
}

/// Load the data, evaluate the selected view and render it as JSON
pub fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let config = load_config(cli.config.as_deref())?;
    let state = LoadState::from_result(load_dataset(cli, config));
    let dataset = state.dataset()?;

    let output = match &cli.command {
        Command::Summary { year, indicator } => {
            let selection = GlobalSelection {
                year: year.clone().map_or(YearFilter::All, YearFilter::Year),
                indicator: indicator
                    .clone()
                    .map_or(IndicatorFilter::All, IndicatorFilter::Indicator),
            };
            render(&global_statistics(&dataset.table, &selection, &dataset.config)?)?
        }
        Command::Groups { indicator } => render(&group_period_summaries(&dataset, indicator)?)?,
        Command::Means { indicator } => render(&period_means(&dataset, indicator)?)?,
        Command::History { indicator } => render(&yearly_group_means(&dataset, indicator)?)?,
        Command::Gap { indicator } => render(&coverage_gap_trend(&dataset, indicator)?)?,
        Command::Test { indicator, period } => {
            let selection = GroupComparisonSelection {
                period: (*period).into(),
                indicator: indicator.clone(),
            };
            render(&hypothesis_test(&dataset, &selection)?)?
        }
        Command::Series {
            department,
            indicator,
        } => render(&department_series(
            &dataset.table,
            department,
            indicator,
            &dataset.config,
        )?)?,
        Command::TopDepartments {
            year,
            indicator,
            lowest,
            limit,
        } => render(&top_departments(
            &dataset,
            &ranking_selection(year, *lowest, *limit),
            indicator,
        )?)?,
        Command::TopIndicators {
            year,
            department,
            lowest,
            limit,
        } => render(&top_indicators(
            &dataset,
            &ranking_selection(year, *lowest, *limit),
            department,
        )?)?,
        Command::BelowTarget { indicator } => render(&below_target(&dataset, indicator)?)?,
        Command::Classification => render(&dataset.classification)?,
    };
    Ok(output)
}

fn ranking_selection(year: &str, lowest: bool, limit: Option<usize>) -> RankingSelection {
    RankingSelection {
        year: year.to_string(),
        ranking: if lowest {
            Ranking::Lowest
        } else {
            Ranking::Highest
        },
        limit,
    }
}

fn render<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Explicit config file, else `<config dir>/cobertura/config.toml`, else defaults
fn load_config(path: Option<&Path>) -> CoberturaResult<AnalysisConfig> {
    if let Some(path) = path {
        return AnalysisConfig::load(path);
    }

    match dirs::config_dir()
        .map(|dir| dir.join("cobertura").join("config.toml"))
        .filter(|p| p.exists())
    {
        Some(path) => AnalysisConfig::load(path),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_dataset(cli: &Cli, config: AnalysisConfig) -> CoberturaResult<CoverageDataset> {
    let reader = open_workbook(&cli.data)?;
    let loaded = load_coverage(reader.as_ref())?;
    let municipalities = read_municipality_departments(&cli.pdet, &cli.pdet_column)?;
    tracing::info!(
        "Loaded {} ({}) and {} PDET municipalities",
        cli.data.display(),
        reader.format_name(),
        municipalities.len()
    );
    CoverageDataset::from_sources(loaded, &municipalities, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ranking_command() {
        let cli = Cli::try_parse_from([
            "cobertura",
            "--data",
            "data/",
            "--pdet",
            "pdet.csv",
            "top-departments",
            "--year",
            "2019",
            "--indicator",
            "BCG",
            "--lowest",
        ])
        .unwrap();

        assert_eq!(cli.pdet_column, MUNICIPALITY_DEPARTMENT_COLUMN);
        match cli.command {
            Command::TopDepartments {
                year, lowest, limit, ..
            } => {
                assert_eq!(year, "2019");
                assert!(lowest);
                assert_eq!(limit, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_test_period() {
        let cli = Cli::try_parse_from([
            "cobertura", "--data", "d", "--pdet", "p", "test", "--indicator", "BCG", "--period",
            "before",
        ])
        .unwrap();
        match cli.command {
            Command::Test { period, .. } => assert_eq!(Period::from(period), Period::Before),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_is_reported() {
        let cli = Cli::try_parse_from([
            "cobertura",
            "--data",
            "/nonexistent/workbook",
            "--pdet",
            "/nonexistent/pdet.csv",
            "classification",
        ])
        .unwrap();
        assert!(run(&cli).is_err());
    }
}
