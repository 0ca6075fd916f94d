/// Normalize a table header into a column label.
///
/// Surrounding whitespace is trimmed, then every remaining space becomes an
/// underscore. Runs of spaces are not collapsed: `"Serial  No"` becomes
/// `"Serial__No"`.
pub fn normalize_header(value: &str) -> String {
    value.trim().replace(' ', "_")
}

/// Render a serial value for console output, dropping the fraction of whole numbers
pub fn format_serial(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
