//! Reduction of a workbook to the loaded coverage value

use crate::reader::{IoError, IoResult, WorkbookReader};
use crate::schema::{
    LoadedCoverage, Sheet, DEPARTMENT_COLUMN, IDENTIFIER_COLUMNS, TARGET_POPULATION_COLUMNS,
};
use std::collections::BTreeMap;

/// Load every sheet of a workbook
pub fn load_coverage(reader: &dyn WorkbookReader) -> IoResult<LoadedCoverage> {
    let names = reader.sheet_names();
    if names.is_empty() {
        return Err(IoError::EmptyWorkbook(
            reader.path().unwrap_or(reader.format_name()).to_string(),
        ));
    }

    let sheets = names
        .iter()
        .map(|name| reader.read_sheet(name))
        .collect::<IoResult<Vec<_>>>()?;

    let loaded = from_sheets(sheets)?;
    tracing::info!(
        "Loaded {} workbook: {} years, {} departments, {} indicator columns",
        reader.format_name(),
        loaded.years.len(),
        loaded.departments.len(),
        loaded.indicator_names.len()
    );
    Ok(loaded)
}

/// Build the loaded value from sheets in year order
///
/// Indicator columns and departments come from the first sheet. The
/// national `TOTAL` row and blank department names are not departments.
pub fn from_sheets(sheets: Vec<Sheet>) -> IoResult<LoadedCoverage> {
    let first = sheets
        .first()
        .ok_or_else(|| IoError::EmptyWorkbook("no sheets".to_string()))?;

    if !first.columns.iter().any(|c| c == DEPARTMENT_COLUMN) {
        return Err(IoError::ColumnNotFound(format!(
            "{} in sheet {}",
            DEPARTMENT_COLUMN, first.name
        )));
    }

    let indicator_names: Vec<String> = first
        .columns
        .iter()
        .filter(|c| !is_excluded_column(c))
        .cloned()
        .collect();

    let mut departments: Vec<String> = Vec::new();
    for row in &first.rows {
        match row.department() {
            Some(name) if !row.is_total() => {
                if !departments.iter().any(|d| d == name) {
                    departments.push(name.to_string());
                }
            }
            Some(_) => {}
            None => tracing::warn!("Skipping row without department in sheet {}", first.name),
        }
    }

    let years: Vec<String> = sheets.iter().map(|s| s.name.clone()).collect();
    let rows_by_year: BTreeMap<String, _> = sheets.into_iter().map(|s| (s.name, s.rows)).collect();

    Ok(LoadedCoverage {
        rows_by_year,
        indicator_names,
        years,
        departments,
    })
}

/// Whether a column is an identifier or target-population column
pub fn is_excluded_column(column: &str) -> bool {
    let column = column.trim();
    IDENTIFIER_COLUMNS.contains(&column) || TARGET_POPULATION_COLUMNS.contains(&column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawRow;

    fn sheet(name: &str, rows: &[(&str, &str)]) -> Sheet {
        let columns = vec![
            "CODEP".to_string(),
            DEPARTMENT_COLUMN.to_string(),
            "Población Menor 1 año (Meta".to_string(),
            "BCG".to_string(),
            "BCG%".to_string(),
        ];
        let mut sheet = Sheet::new(name, columns);
        for (dept, value) in rows {
            sheet.push(
                RawRow::new()
                    .with(DEPARTMENT_COLUMN, *dept)
                    .with("BCG%", *value),
            );
        }
        sheet
    }

    #[test]
    fn test_indicator_columns_exclude_identifiers() {
        let loaded = from_sheets(vec![sheet("2014", &[("AMAZONAS", "90")])]).unwrap();
        assert_eq!(loaded.indicator_names, vec!["BCG", "BCG%"]);
    }

    #[test]
    fn test_departments_exclude_total() {
        let loaded = from_sheets(vec![
            sheet("2014", &[("AMAZONAS", "90"), ("TOTAL", "91"), ("CHOCO", "70")]),
            sheet("2015", &[("AMAZONAS", "92"), ("CHOCO", "71")]),
        ])
        .unwrap();

        assert_eq!(loaded.departments, vec!["AMAZONAS", "CHOCO"]);
        assert_eq!(loaded.years, vec!["2014", "2015"]);
        assert_eq!(loaded.rows("2014").unwrap().len(), 3);
        assert!(loaded.rows("2016").is_none());
    }

    #[test]
    fn test_missing_department_column() {
        let sheet = Sheet::new("2014", vec!["BCG%".to_string()]);
        assert!(matches!(
            from_sheets(vec![sheet]),
            Err(IoError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_no_sheets() {
        assert!(matches!(from_sheets(Vec::new()), Err(IoError::EmptyWorkbook(_))));
    }
}
