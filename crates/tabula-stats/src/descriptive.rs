//! Per-column descriptive statistics.

use std::collections::HashMap;

use tabula_model::{
    CategoricalColumnStats, Cell, ColumnType, Dataset, NumericColumnStats, Statistics, ValueCount,
};

/// Number of entries kept in `top_values`.
pub const TOP_VALUES_LIMIT: usize = 10;

/// Summarize one numeric column.
///
/// Returns `None` for an empty slice. The median is the element at
/// `floor(n / 2)` of the sorted values, so even-length inputs report the
/// upper of the two middle values rather than their average. The standard
/// deviation divides by `n` (population).
///
/// Finite inputs always give finite results: when the direct sums overflow,
/// mean and deviation are recomputed on values scaled by the largest
/// magnitude.
pub fn numeric_stats(column: &str, values: &[f64]) -> Option<NumericColumnStats> {
    if values.is_empty() {
        return None;
    }
    let (mean, std) = mean_and_std(values);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[sorted.len() / 2];

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    Some(NumericColumnStats {
        column: column.to_string(),
        mean,
        median,
        std,
        min,
        max,
        count: values.len(),
    })
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let (mean, std) = scaled_mean_and_std(values, 1.0);
    if mean.is_finite() && std.is_finite() {
        return (mean, std);
    }
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return (mean, std);
    }
    // Scaled values lie in [-1, 1], so neither sum can overflow.
    let (mean, std) = scaled_mean_and_std(values, scale);
    (mean * scale, std * scale)
}

fn scaled_mean_and_std(values: &[f64], scale: f64) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().map(|v| v / scale).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| (v / scale - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

/// Summarize one categorical column from its raw string values.
pub fn categorical_stats<'a>(
    column: &str,
    values: impl IntoIterator<Item = &'a str>,
) -> CategoricalColumnStats {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        match positions.get(value) {
            Some(&pos) => order[pos].1 += 1,
            None => {
                positions.insert(value, order.len());
                order.push((value, 1));
            }
        }
    }
    let unique_count = order.len();
    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    let top_values = order
        .into_iter()
        .take(TOP_VALUES_LIMIT)
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();

    CategoricalColumnStats {
        column: column.to_string(),
        unique_count,
        top_values,
    }
}

/// Compute statistics for every column in header order.
pub fn compute_statistics(dataset: &Dataset) -> Statistics {
    let mut statistics = Statistics::default();
    for (idx, column) in dataset.columns.iter().enumerate() {
        match column.inferred_type {
            ColumnType::Numeric => {
                let values: Vec<f64> = dataset.column_cells(idx).filter_map(Cell::as_f64).collect();
                match numeric_stats(&column.name, &values) {
                    Some(stats) => statistics.numerical.push(stats),
                    None => tracing::debug!(column = %column.name, "numeric column has no values"),
                }
            }
            ColumnType::Categorical => {
                let stats =
                    categorical_stats(&column.name, dataset.column_cells(idx).filter_map(Cell::as_text));
                statistics.categorical.push(stats);
            }
        }
    }
    statistics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_even_length_takes_upper_middle() {
        let stats = numeric_stats("x", &[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn median_of_odd_length_takes_middle() {
        let stats = numeric_stats("x", &[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn std_is_population_not_sample() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = numeric_stats("x", &values).unwrap();
        assert_eq!(stats.mean, 5.0);
        // Population variance is 4; the sample variance would be 32 / 7.
        assert!((stats.std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_numeric_input_yields_nothing() {
        assert!(numeric_stats("x", &[]).is_none());
    }

    #[test]
    fn single_value_has_zero_std() {
        let stats = numeric_stats("x", &[42.0]).unwrap();
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.max, 42.0);
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn top_values_ties_keep_first_seen_order() {
        let stats = categorical_stats("c", ["b", "a", "c", "a", "b", ""]);
        assert_eq!(stats.unique_count, 3);
        let order: Vec<(&str, usize)> = stats
            .top_values
            .iter()
            .map(|entry| (entry.value.as_str(), entry.count))
            .collect();
        assert_eq!(order, vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn top_values_are_capped_at_ten() {
        let values: Vec<String> = (0..15).map(|i| format!("v{i}")).collect();
        let stats = categorical_stats("c", values.iter().map(String::as_str));
        assert_eq!(stats.unique_count, 15);
        assert_eq!(stats.top_values.len(), TOP_VALUES_LIMIT);
        assert_eq!(stats.top_values[0].value, "v0");
    }
}
