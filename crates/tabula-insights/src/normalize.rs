//! Final shaping of an insight list.

use std::collections::HashSet;

use crate::config::InsightLimits;

/// Last-resort filler appended after the caller's own filler.
pub const GENERIC_FILLER: [&str; 3] = [
    "Dataset analysis completed successfully.",
    "Consider exploring relationships between numerical variables for deeper insights.",
    "Review categorical distributions for potential data quality issues.",
];

/// Trim, drop empties, deduplicate, cap and pad.
///
/// Order is preserved. When fewer than `limits.min_insights` remain, entries
/// from `filler` and then [`GENERIC_FILLER`] that are not already present are
/// appended until the minimum is reached.
#[must_use]
pub fn finalize_insights(
    items: Vec<String>,
    filler: &[String],
    limits: InsightLimits,
) -> Vec<String> {
    let limits = limits.sanitized();
    let mut seen = HashSet::new();
    let mut out: Vec<String> = Vec::with_capacity(limits.max_insights);

    for item in items {
        if out.len() >= limits.max_insights {
            break;
        }
        let trimmed = item.trim();
        if !trimmed.is_empty() && seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }

    let padding = filler
        .iter()
        .map(String::as_str)
        .chain(GENERIC_FILLER)
        .map(str::trim);
    for candidate in padding {
        if out.len() >= limits.min_insights {
            break;
        }
        if !candidate.is_empty() && seen.insert(candidate.to_string()) {
            out.push(candidate.to_string());
        }
    }

    out
}
