//! Dashboard views
//!
//! Every view is a pure function of the loaded data and an explicit
//! selection. Views never cache: the caller evaluates them again when the
//! selection changes, and identical inputs give identical results.
//!
//! Absent cells are dropped before any statistic is computed. A view over
//! a selection with no observations reports `None` values rather than
//! failing; only unknown indicators and years are errors.

pub mod comparison;
pub mod global;
pub mod groups;
pub mod ranking;
pub mod series;

pub use comparison::*;
pub use global::*;
pub use groups::*;
pub use ranking::*;
pub use series::*;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::config::AnalysisConfig;
    use crate::dataset::CoverageDataset;
    use cobertura_io::{from_sheets, RawRow, Sheet, DEPARTMENT_CODE_COLUMN, DEPARTMENT_COLUMN};

    pub const YEARS: [&str; 6] = ["2014", "2015", "2016", "2017", "2018", "2019"];

    /// BCG coverage per department, 2014 to 2019
    const BCG: [(&str, [Option<&str>; 6]); 5] = [
        ("ANTIOQUIA", [Some("96,0"), Some("96"), Some("97"), Some("97"), Some("98"), Some("98")]),
        ("CAUCA", [Some("80"), Some("82"), Some("84"), Some("86"), Some("88"), Some("90")]),
        ("CHOCO", [Some("70"), None, Some("74"), Some("76"), Some("78"), Some("80")]),
        ("HUILA", [Some("94"), Some("95"), Some("96"), Some("95"), Some("94"), Some("93")]),
        ("META", [Some("90"), Some("90"), Some("91"), Some("91"), Some("92"), Some("92")]),
    ];

    /// Polio coverage, constant across years
    const POLIO: [(&str, &str); 5] = [
        ("ANTIOQUIA", "99"),
        ("CAUCA", "60"),
        ("CHOCO", "55"),
        ("HUILA", "97"),
        ("META", "85"),
    ];

    /// PDET municipality list: CAUCA and CHOCO are high concentration
    pub fn municipalities() -> Vec<&'static str> {
        let mut list = vec!["CAUCA"; 6];
        list.extend(vec!["Chocó"; 5]);
        list.extend(vec!["Antioquia"; 2]);
        list.extend(vec!["META"; 4]);
        list
    }

    pub fn dataset() -> CoverageDataset {
        let columns: Vec<String> = [
            DEPARTMENT_CODE_COLUMN,
            DEPARTMENT_COLUMN,
            "Población Menor 1 año (Meta",
            "BCG",
            "BCG%",
            "POLIO",
            "POLIO%",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();

        let sheets = YEARS
            .iter()
            .enumerate()
            .map(|(i, year)| {
                let mut sheet = Sheet::new(*year, columns.clone());
                for (code, ((department, values), (_, polio))) in
                    BCG.iter().zip(POLIO.iter()).enumerate()
                {
                    let mut row = RawRow::new()
                        .with(DEPARTMENT_CODE_COLUMN, code.to_string())
                        .with(DEPARTMENT_COLUMN, *department)
                        .with("Población Menor 1 año (Meta", "1000")
                        .with("BCG", "900")
                        .with("POLIO", "800")
                        .with("POLIO%", *polio);
                    row.insert("BCG%", values[i].map(str::to_string));
                    sheet.push(row);
                }
                sheet.push(
                    RawRow::new()
                        .with(DEPARTMENT_COLUMN, "TOTAL")
                        .with("BCG%", "90")
                        .with("POLIO%", "80"),
                );
                sheet
            })
            .collect();

        let loaded = from_sheets(sheets).unwrap();
        CoverageDataset::from_sources(loaded, &municipalities(), AnalysisConfig::default()).unwrap()
    }
}
