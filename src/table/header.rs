use log::trace;
use std::collections::HashMap;

/// Normalized header name to zero-based column index.
pub type HeaderMap = HashMap<String, usize>;

/// Normalizes a header name for lookup: trimmed and lower-cased.
pub fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Builds the header map from the header row.
/// Blank header cells get no entry; a repeated name maps to its last column.
pub fn header_map(header_row: &[String]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (index, cell) in header_row.iter().enumerate() {
        let name = normalize(cell);
        if !name.is_empty() {
            headers.insert(name, index);
        }
    }
    trace!("Parsed {} headers from {} header cells", headers.len(), header_row.len());
    headers
}

/// Derives the accessor name for a normalized header: split on underscores,
/// capitalize each segment and concatenate them (`first_name` → `FirstName`).
pub fn accessor_name(header: &str) -> String {
    header.split('_').map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
