//! Normalization of textual coverage values
//!
//! Source sheets store percentages as text with either a decimal comma
//! (`"95,5"`) or a decimal point (`"95.5"`).

/// Parse a textual coverage value
///
/// Accepts `.` or `,` as the decimal separator and an optional trailing
/// `%`. Blank, non-numeric and non-finite text is `None`, never zero.
pub fn parse_coverage(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an optional cell
pub fn parse_cell(cell: Option<&str>) -> Option<f64> {
    cell.and_then(parse_coverage)
}
