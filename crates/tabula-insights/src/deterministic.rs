//! Rule-based insights computed directly from column statistics.

use tabula_model::{CorrelationPair, Statistics};

/// Pairs with `|r|` above this are reported as strong.
pub const STRONG_CORRELATION: f64 = 0.7;

/// Pairs with `|r|` above this (and not strong) are counted as moderate.
pub const MODERATE_CORRELATION: f64 = 0.4;

/// Categorical columns with more distinct values than this are flagged.
pub const HIGH_CARDINALITY: usize = 10;

/// Build the deterministic insight list.
///
/// Always returns at least the column-count summary. Sections with no
/// underlying data are skipped. When several columns tie for a maximum, the
/// first one in header order wins.
#[must_use]
pub fn deterministic_insights(
    statistics: &Statistics,
    correlations: Option<&[CorrelationPair]>,
) -> Vec<String> {
    let mut insights = vec![column_summary(statistics)];

    let numerical = &statistics.numerical;
    if let Some(top) = first_max_by(numerical, |col| col.mean) {
        insights.push(format!(
            "'{}' has the highest average value ({:.2}).",
            top.column, top.mean
        ));
    }
    if let Some(top) = first_max_by(numerical, |col| col.std) {
        insights.push(format!(
            "'{}' shows the most variability (standard deviation {:.2}).",
            top.column, top.std
        ));
    }
    let outliers: Vec<&str> = numerical
        .iter()
        .filter(|col| col.std > 0.5 * col.mean)
        .map(|col| col.column.as_str())
        .collect();
    if !outliers.is_empty() {
        insights.push(format!(
            "Potential outliers detected in: {}.",
            outliers.join(", ")
        ));
    }

    let categorical = &statistics.categorical;
    if let Some(top) = first_max_by(categorical, |col| col.unique_count as f64) {
        insights.push(format!(
            "'{}' has the most distinct values ({} unique).",
            top.column, top.unique_count
        ));
    }
    let high_cardinality: Vec<&str> = categorical
        .iter()
        .filter(|col| col.unique_count > HIGH_CARDINALITY)
        .map(|col| col.column.as_str())
        .collect();
    if !high_cardinality.is_empty() {
        insights.push(format!(
            "High cardinality columns: {}.",
            high_cardinality.join(", ")
        ));
    }

    if let Some(pairs) = correlations.filter(|pairs| !pairs.is_empty()) {
        let strongest = first_max_by(pairs, CorrelationPair::strength)
            .filter(|pair| pair.strength() > STRONG_CORRELATION);
        if let Some(pair) = strongest {
            insights.push(format!(
                "Strong {} correlation between '{}' and '{}' (r = {:.2}).",
                direction(pair.correlation),
                pair.column1,
                pair.column2,
                pair.correlation
            ));
        }
        let moderate = pairs
            .iter()
            .filter(|pair| {
                let r = pair.strength();
                r > MODERATE_CORRELATION && r <= STRONG_CORRELATION
            })
            .count();
        if moderate > 0 {
            insights.push(format!(
                "{moderate} moderate {} found between numeric columns.",
                plural(moderate, "correlation", "correlations")
            ));
        }
    }

    let constant: Vec<&str> = numerical
        .iter()
        .filter(|col| col.std == 0.0)
        .map(|col| col.column.as_str())
        .collect();
    if !constant.is_empty() {
        insights.push(format!(
            "Constant-valued {} with no variation: {}.",
            plural(constant.len(), "column", "columns"),
            constant.join(", ")
        ));
    }

    insights
}

fn column_summary(statistics: &Statistics) -> String {
    let total = statistics.column_count();
    format!(
        "Dataset contains {total} {}: {} numeric and {} categorical.",
        plural(total, "column", "columns"),
        statistics.numerical.len(),
        statistics.categorical.len()
    )
}

/// First element with the largest key; later equal keys never replace it.
fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, current)) if value <= current => {}
            _ if value.is_nan() => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

fn direction(r: f64) -> &'static str {
    if r < 0.0 { "negative" } else { "positive" }
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}
