//! Value coercion for raw cells.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::Cell;

/// Leading numeric token: digits, an optional point, then exactly one digit.
///
/// Cells such as `"83.2 e"` or `"80.9 b"` carry annotation flags after the
/// number. The pattern needs at least two digit characters, so `"5"` and
/// `": "` yield nothing.
static VALUE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+\.?[0-9])").unwrap());

/// Extract the first numeric token from a raw cell.
pub fn extract_value(raw: &str) -> Option<f64> {
    VALUE_PATTERN
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a column header or cell as a year.
pub fn parse_year(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Coerce a cell to a finite float, tolerating annotated text.
pub fn lenient_float(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Text(s) => extract_value(s),
        other => other.as_f64(),
    }
}

/// Coerce a cell to a finite float, accepting only numeric cells.
pub fn strict_float(cell: &Cell) -> Option<f64> {
    cell.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_values() {
        assert_eq!(extract_value("79.6"), Some(79.6));
        assert_eq!(extract_value("12"), Some(12.0));
        assert_eq!(extract_value("100.5"), Some(100.5));
    }

    #[test]
    fn test_extract_annotated_values() {
        assert_eq!(extract_value("83.2 "), Some(83.2));
        assert_eq!(extract_value("83.2 e"), Some(83.2));
        assert_eq!(extract_value("80.9 b"), Some(80.9));
        assert_eq!(extract_value("  77.1 p"), Some(77.1));
    }

    #[test]
    fn test_extract_keeps_one_fractional_digit() {
        assert_eq!(extract_value("83.25"), Some(83.2));
        assert_eq!(extract_value("1.5"), Some(1.5));
    }

    #[test]
    fn test_extract_rejects_missing_markers() {
        assert_eq!(extract_value(":"), None);
        assert_eq!(extract_value(": "), None);
        assert_eq!(extract_value(": c"), None);
        assert_eq!(extract_value(""), None);
        assert_eq!(extract_value("5"), None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year("2019 "), Some(2019));
        assert_eq!(parse_year("year"), None);
    }

    #[test]
    fn test_float_coercion_modes() {
        assert_eq!(lenient_float(&Cell::from("79.4 e")), Some(79.4));
        assert_eq!(lenient_float(&Cell::Integer(80)), Some(80.0));
        assert_eq!(strict_float(&Cell::from("79.4")), None);
        assert_eq!(strict_float(&Cell::Float(81.1)), Some(81.1));
        assert_eq!(strict_float(&Cell::Float(f64::NAN)), None);
        assert_eq!(strict_float(&Cell::Null), None);
    }
}
