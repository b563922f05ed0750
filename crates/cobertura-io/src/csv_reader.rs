//! CSV sources: per-year sheet directories and municipality lists

use crate::reader::{IoError, IoResult, WorkbookReader};
use crate::schema::{RawRow, Sheet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Default column naming the department in the PDET municipality list
pub const MUNICIPALITY_DEPARTMENT_COLUMN: &str = "DEPARTAMENTO";

/// A workbook stored as a directory of `<sheet>.csv` files
pub struct CsvWorkbook {
    path: String,
    sheets: Vec<(String, PathBuf)>,
    delimiter: Option<u8>,
}

impl CsvWorkbook {
    /// Open a directory, detecting the delimiter of each file
    pub fn open(dir: impl AsRef<Path>) -> IoResult<Self> {
        Self::open_with_delimiter(dir, None)
    }

    /// Open a directory with an explicit delimiter (`None` to detect)
    pub fn open_with_delimiter(dir: impl AsRef<Path>, delimiter: Option<u8>) -> IoResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(IoError::FileNotFound(dir.display().to_string()));
        }

        let mut sheets: Vec<(String, PathBuf)> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.eq_ignore_ascii_case("csv"))
                        .unwrap_or(false)
            })
            .filter_map(|p| {
                let stem = p.file_stem()?.to_str()?.trim().to_string();
                Some((stem, p))
            })
            .collect();
        sheets.sort_by(|a, b| a.0.cmp(&b.0));

        if sheets.is_empty() {
            return Err(IoError::EmptyWorkbook(dir.display().to_string()));
        }

        tracing::debug!("Found {} csv sheets in {}", sheets.len(), dir.display());

        Ok(Self {
            path: dir.display().to_string(),
            sheets,
            delimiter,
        })
    }
}

impl WorkbookReader for CsvWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&self, name: &str) -> IoResult<Sheet> {
        let (_, path) = self
            .sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .ok_or_else(|| IoError::SheetNotFound(name.to_string()))?;

        let delimiter = match self.delimiter {
            Some(d) => d,
            None => detect_delimiter(path)?,
        };
        read_sheet_file(name, path, delimiter)
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// Read a single CSV file as a sheet
pub fn read_sheet_file(name: &str, path: &Path, delimiter: u8) -> IoResult<Sheet> {
    let mut reader = open_csv(path, delimiter)?;
    let columns = read_headers(&mut reader)?;

    let mut sheet = Sheet::new(name, columns.clone());
    for result in reader.records() {
        let record = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        let mut row = RawRow::new();
        for (i, column) in columns.iter().enumerate() {
            row.insert(column.clone(), record.get(i).map(|v| v.to_string()));
        }
        sheet.push(row);
    }

    tracing::debug!("Read sheet {} with {} rows", name, sheet.len());
    Ok(sheet)
}

/// Read the PDET municipality list, one department name per municipality
///
/// Rows with a blank department are skipped.
pub fn read_municipality_departments(path: impl AsRef<Path>, column: &str) -> IoResult<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let delimiter = detect_delimiter(path)?;
    let mut reader = open_csv(path, delimiter)?;
    let headers = read_headers(&mut reader)?;
    let index = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .ok_or_else(|| IoError::ColumnNotFound(column.to_string()))?;

    let mut departments = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;
        match record.get(index).map(str::trim) {
            Some(name) if !name.is_empty() => departments.push(name.to_string()),
            _ => tracing::warn!("Skipping municipality row {} without department", line + 2),
        }
    }

    tracing::info!(
        "Read {} PDET municipalities from {}",
        departments.len(),
        path.display()
    );
    Ok(departments)
}

/// Pick `;` when the header line uses it, otherwise `,`
fn detect_delimiter(path: &Path) -> IoResult<u8> {
    let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
    let mut header = String::new();
    BufReader::new(file).read_line(&mut header)?;
    Ok(if header.contains(';') { b';' } else { b',' })
}

fn open_csv(path: &Path, delimiter: u8) -> IoResult<csv::Reader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file)))
}

fn read_headers(reader: &mut csv::Reader<BufReader<File>>) -> IoResult<Vec<String>> {
    Ok(reader
        .headers()
        .map_err(|e| IoError::InvalidFormat(e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEPARTMENT_COLUMN;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_semicolon_sheet_with_decimal_comma() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "2014.csv",
            "CODEP;DEPARTAMENTOS;BCG%\n91;AMAZONAS;95,5\n05;ANTIOQUIA;\n",
        );

        let workbook = CsvWorkbook::open(dir.path()).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["2014"]);

        let sheet = workbook.read_sheet("2014").unwrap();
        assert_eq!(sheet.columns, vec!["CODEP", "DEPARTAMENTOS", "BCG%"]);
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rows[0].get("BCG%"), Some("95,5"));
        assert_eq!(sheet.rows[1].get(DEPARTMENT_COLUMN), Some("ANTIOQUIA"));
        assert_eq!(sheet.rows[1].get("BCG%"), None);
    }

    #[test]
    fn test_sheets_sorted_and_non_csv_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "2015.csv", "DEPARTAMENTOS,BCG%\nCHOCO,80.1\n");
        write(dir.path(), "2014.csv", "DEPARTAMENTOS,BCG%\nCHOCO,79.0\n");
        write(dir.path(), "notes.txt", "ignored");

        let workbook = CsvWorkbook::open(dir.path()).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["2014", "2015"]);
        assert_eq!(workbook.format_name(), "CSV");
        assert!(matches!(
            workbook.read_sheet("2020"),
            Err(IoError::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CsvWorkbook::open(dir.path()),
            Err(IoError::EmptyWorkbook(_))
        ));
    }

    #[test]
    fn test_bom_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "2016.csv",
            "\u{feff}DEPARTAMENTOS;BCG%\nARAUCA;90\n;\n",
        );
        let sheet = CsvWorkbook::open(dir.path())
            .unwrap()
            .read_sheet("2016")
            .unwrap();
        assert_eq!(sheet.columns[0], "DEPARTAMENTOS");
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_municipality_departments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "pdet.csv",
            "MUNICIPIO,Departamento\nTumaco,NARIÑO\nRiosucio,CHOCO\nSin dato,\nBarbacoas,NARIÑO\n",
        );

        let departments = read_municipality_departments(&path, MUNICIPALITY_DEPARTMENT_COLUMN).unwrap();
        assert_eq!(departments, vec!["NARIÑO", "CHOCO", "NARIÑO"]);
    }

    #[test]
    fn test_municipality_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "pdet.csv", "MUNICIPIO\nTumaco\n");
        assert!(matches!(
            read_municipality_departments(&path, MUNICIPALITY_DEPARTMENT_COLUMN),
            Err(IoError::ColumnNotFound(_))
        ));
    }
}
