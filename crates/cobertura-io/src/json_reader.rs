//! JSON workbook reader
//!
//! Accepts either `{ "<year>": [ {column: value} ] }` or the same object
//! nested under a `rowsByYear` key. Cell values may be strings, numbers or
//! null; numbers keep their textual form. Sheets are sorted by name,
//! whatever their order in the document.

use crate::reader::{IoError, IoResult, WorkbookReader};
use crate::schema::{RawRow, Sheet};
use serde_json::{Map, Value};
use std::path::Path;

/// A workbook held in a JSON document
pub struct JsonWorkbook {
    path: Option<String>,
    sheets: Vec<Sheet>,
}

impl JsonWorkbook {
    /// Open a JSON file
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let mut workbook = Self::from_str(&content)?;
        workbook.path = Some(path.display().to_string());
        Ok(workbook)
    }

    /// Parse a JSON document
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> IoResult<Self> {
        let document: Value =
            serde_json::from_str(content).map_err(|e| IoError::InvalidFormat(e.to_string()))?;

        let root = document
            .as_object()
            .ok_or_else(|| IoError::InvalidFormat("expected a JSON object".to_string()))?;
        let sheets_object = match root.get("rowsByYear") {
            Some(Value::Object(inner)) => inner,
            Some(_) => {
                return Err(IoError::InvalidFormat(
                    "rowsByYear must be an object".to_string(),
                ))
            }
            None => root,
        };

        let mut sheets = sheets_object
            .iter()
            .map(|(name, rows)| parse_sheet(name, rows))
            .collect::<IoResult<Vec<_>>>()?;
        sheets.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self { path: None, sheets })
    }
}

impl WorkbookReader for JsonWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn read_sheet(&self, name: &str) -> IoResult<Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| IoError::SheetNotFound(name.to_string()))
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

fn parse_sheet(name: &str, rows: &Value) -> IoResult<Sheet> {
    let rows = rows
        .as_array()
        .ok_or_else(|| IoError::InvalidFormat(format!("sheet {} is not an array", name)))?;

    let mut columns: Vec<String> = Vec::new();
    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows {
        let object = row
            .as_object()
            .ok_or_else(|| IoError::InvalidFormat(format!("sheet {} has a non-object row", name)))?;
        for key in object.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        parsed.push(parse_row(name, object)?);
    }

    let mut sheet = Sheet::new(name, columns);
    sheet.rows = parsed;
    Ok(sheet)
}

fn parse_row(sheet: &str, object: &Map<String, Value>) -> IoResult<RawRow> {
    let mut row = RawRow::new();
    for (column, value) in object {
        let text = match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(IoError::InvalidFormat(format!(
                    "sheet {} column {} holds a nested value",
                    sheet, column
                )))
            }
        };
        row.insert(column.clone(), text);
    }
    Ok(row)
}
