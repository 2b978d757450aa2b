//! Line and cell splitting for comma-delimited text.
//!
//! Splitting is deliberately naive: quoted fields containing commas are not
//! reconstructed, and quotes are stripped rather than unescaped.

use std::collections::BTreeSet;

/// Split raw text into non-blank lines.
pub fn split_lines(raw: &str) -> Vec<&str> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Split one line on commas and normalize each cell.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(normalize_cell).collect()
}

pub fn normalize_cell(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .trim()
        .trim_matches('"')
        .trim()
        .to_string()
}

/// Make header names unique and non-empty.
///
/// Blank names become `column_<n>` (1-based position); repeated names get a
/// `_<k>` suffix starting at 2.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut used = BTreeSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("column_{}", idx + 1)
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 2usize;
        while used.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        if candidate != base {
            tracing::debug!(original = %base, renamed = %candidate, "renamed duplicate header");
        }
        used.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}
