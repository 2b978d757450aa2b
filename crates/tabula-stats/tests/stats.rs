use proptest::prelude::*;

use tabula_ingest::ingest;
use tabula_stats::{compute_statistics, correlate, numeric_stats, pearson};

const SALES: &str = "price,category\n10,A\n20,B\n30,A\n40,C\n50,A\n60,B\n70,A\n80,C\n90,A\n100,B";

#[test]
fn price_category_statistics() {
    let dataset = ingest(SALES).expect("ingest");
    let statistics = compute_statistics(&dataset);

    assert_eq!(statistics.numerical.len(), 1);
    let price = &statistics.numerical[0];
    assert_eq!(price.column, "price");
    assert_eq!(price.count, 10);
    assert_eq!(price.min, 10.0);
    assert_eq!(price.max, 100.0);
    assert_eq!(price.mean, 55.0);
    assert_eq!(price.median, 60.0);
    assert!((price.std - 28.72).abs() < 0.01);
    assert!((price.std - 825f64.sqrt()).abs() < 1e-9);

    assert_eq!(statistics.categorical.len(), 1);
    let category = &statistics.categorical[0];
    assert_eq!(category.unique_count, 3);
    let top: Vec<(&str, usize)> = category
        .top_values
        .iter()
        .map(|entry| (entry.value.as_str(), entry.count))
        .collect();
    assert_eq!(top, vec![("A", 5), ("B", 3), ("C", 2)]);

    assert!(correlate(&dataset).is_none());
}

#[test]
fn unparseable_cells_in_numeric_column_are_excluded() {
    let text = "x\n1\n2\n3\n4\n5\n6\n7\n8\n9\nn/a\n";
    let dataset = ingest(text).expect("ingest");
    let statistics = compute_statistics(&dataset);
    assert_eq!(statistics.numerical[0].count, 9);
    assert_eq!(statistics.numerical[0].median, 5.0);
}

#[test]
fn correlations_use_rows_where_both_columns_are_numeric() {
    let text = "a,b,c\n1,2,5\n2,4,5\n3,,5\n4,8,5\n5,10,5\n6,12,5\n";
    let dataset = ingest(text).expect("ingest");
    let pairs = correlate(&dataset).expect("at least one pair");

    // `c` is constant, so only (a, b) survives.
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].column1, "a");
    assert_eq!(pairs[0].column2, "b");
    assert!((pairs[0].correlation - 1.0).abs() < 1e-12);
}

#[test]
fn pair_order_follows_header_order() {
    let text = "z,label,y,x\n1,a,3,2\n2,b,1,4\n3,c,2,7\n4,d,5,5\n";
    let dataset = ingest(text).expect("ingest");
    let pairs = correlate(&dataset).expect("pairs");
    let names: Vec<(&str, &str)> = pairs
        .iter()
        .map(|pair| (pair.column1.as_str(), pair.column2.as_str()))
        .collect();
    assert_eq!(names, vec![("z", "y"), ("z", "x"), ("y", "x")]);
}

#[test]
fn all_pairs_degenerate_means_no_correlations() {
    let text = "a,b\n1,1\n1,2\n1,3\n";
    let dataset = ingest(text).expect("ingest");
    assert!(correlate(&dataset).is_none());
}

#[test]
fn huge_values_keep_statistics_finite() {
    let dataset = ingest("big,label\n1e200,a\n-1e200,b\n").expect("ingest");
    let statistics = compute_statistics(&dataset);
    let big = &statistics.numerical[0];
    assert_eq!(big.mean, 0.0);
    assert!((big.std / 1e200 - 1.0).abs() < 1e-12);
    assert_eq!((big.min, big.max), (-1e200, 1e200));

    let top = numeric_stats("x", &[f64::MAX, f64::MAX, f64::MAX]).unwrap();
    assert!((top.mean / f64::MAX - 1.0).abs() < 1e-12);
    assert_eq!(top.std, 0.0);
}

proptest! {
    #[test]
    fn median_lies_between_min_and_max(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..200)) {
        let stats = numeric_stats("x", &values).unwrap();
        prop_assert!(stats.min <= stats.median);
        prop_assert!(stats.median <= stats.max);
        prop_assert!(stats.std >= 0.0);
        prop_assert_eq!(stats.count, values.len());
    }

    #[test]
    fn std_matches_population_formula(values in prop::collection::vec(-1.0e3f64..1.0e3, 1..100)) {
        let stats = numeric_stats("x", &values).unwrap();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let expected = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        prop_assert!((stats.std - expected).abs() < 1e-9);
    }

    #[test]
    fn finite_inputs_give_finite_statistics(
        values in prop::collection::vec(prop::num::f64::NORMAL | prop::num::f64::ZERO, 1..50)
    ) {
        let stats = numeric_stats("x", &values).unwrap();
        prop_assert!(stats.mean.is_finite());
        prop_assert!(stats.std.is_finite());
        prop_assert!(stats.std >= 0.0);
    }

    #[test]
    fn correlation_is_bounded_or_absent(
        pairs in prop::collection::vec((-1.0e3f64..1.0e3, -1.0e3f64..1.0e3), 0..50)
    ) {
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Some(r) = pearson(&xs, &ys) {
            prop_assert!(xs.len() >= 2);
            prop_assert!(r.is_finite());
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }
}
