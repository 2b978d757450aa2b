//! Pairwise Pearson correlation between numeric columns.

use tabula_model::{CorrelationPair, Dataset};

/// Pearson correlation coefficient.
///
/// Returns `None` when the vectors differ in length, have fewer than two
/// elements, either side has zero variance, or the result is not finite.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y2: f64 = ys.iter().map(|y| y * y).sum();

    let spread_x = n * sum_x2 - sum_x * sum_x;
    let spread_y = n * sum_y2 - sum_y * sum_y;
    // Cancellation can leave a constant column with a tiny non-zero spread.
    if is_degenerate(spread_x, n * sum_x2) || is_degenerate(spread_y, n * sum_y2) {
        return None;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = (spread_x * spread_y).sqrt();
    if denominator == 0.0 {
        return None;
    }
    let r = numerator / denominator;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

fn is_degenerate(spread: f64, scale: f64) -> bool {
    spread <= f64::EPSILON * scale.abs().max(1.0)
}

/// Correlate every pair of numeric columns.
///
/// Pairs are ordered `(i, j)` with `i < j` over numeric columns in header
/// order. Each pair only uses rows where both cells are numeric. Returns
/// `None` when fewer than two numeric columns exist or no pair produced a
/// valid coefficient.
pub fn correlate(dataset: &Dataset) -> Option<Vec<CorrelationPair>> {
    let numeric = dataset.numeric_column_indices();
    if numeric.len() < 2 {
        return None;
    }
    let series: Vec<(&str, Vec<Option<f64>>)> = numeric
        .iter()
        .map(|&idx| {
            (
                dataset.columns[idx].name.as_str(),
                dataset.numeric_values(idx),
            )
        })
        .collect();

    let mut pairs = Vec::new();
    for i in 0..series.len() {
        for j in (i + 1)..series.len() {
            let (name_x, values_x) = &series[i];
            let (name_y, values_y) = &series[j];
            let (xs, ys) = align(values_x, values_y);
            match pearson(&xs, &ys) {
                Some(correlation) => pairs.push(CorrelationPair {
                    column1: (*name_x).to_string(),
                    column2: (*name_y).to_string(),
                    correlation,
                }),
                None => tracing::debug!(
                    column1 = name_x,
                    column2 = name_y,
                    rows = xs.len(),
                    "skipped degenerate correlation pair"
                ),
            }
        }
    }

    if pairs.is_empty() { None } else { Some(pairs) }
}

/// Keep only rows where both columns hold a numeric value.
fn align(xs: &[Option<f64>], ys: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_positive_correlation() {
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_negative_correlation() {
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_is_omitted() {
        assert!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).is_none());
        assert!(pearson(&[0.1, 0.1, 0.1, 0.1], &[1.0, 2.0, 3.0, 4.0]).is_none());
    }

    #[test]
    fn too_short_or_mismatched_is_omitted() {
        assert!(pearson(&[1.0], &[2.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_none());
        assert!(pearson(&[], &[]).is_none());
    }

    #[test]
    fn align_keeps_rows_where_both_present() {
        let (xs, ys) = align(
            &[Some(1.0), None, Some(3.0), Some(4.0)],
            &[Some(10.0), Some(20.0), None, Some(40.0)],
        );
        assert_eq!(xs, vec![1.0, 4.0]);
        assert_eq!(ys, vec![10.0, 40.0]);
    }
}
