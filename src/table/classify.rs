//! Cell content rules: summary-row detection and numeric coercion.
use regex::Regex;
use std::sync::LazyLock;

static TOTAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(total|subtotal)\b").expect("Hardcode regex pattern"));

/// Returns true if any cell holds the word "total" or "subtotal", in any case.
pub fn is_total_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter()
        .any(|cell| TOTAL_PATTERN.is_match(&cell.as_ref().to_lowercase()))
}

/// Parses a cell as a number, or None when it does not hold a finite number.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Numeric value of a cell for aggregation; anything non-numeric counts as 0.
#[inline]
pub fn coerce_number(value: &str) -> f64 {
    parse_number(value).unwrap_or(0.0)
}
