//! Column type classification.

use tabula_model::{Cell, ColumnType};

/// A column is numeric when strictly more than this share of its non-empty
/// cells parse as finite numbers.
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.8;

/// Parse a cell as a finite number.
///
/// The whole cell must be a number: unit suffixes such as `10kg` or `12%`
/// make it text. `NaN` and infinities are rejected even though
/// `f64::from_str` accepts them.
pub fn parse_numeric(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCounts {
    pub non_empty: usize,
    pub numeric: usize,
}

impl ColumnCounts {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = Self::default();
        for value in values {
            if value.is_empty() {
                continue;
            }
            counts.non_empty += 1;
            if parse_numeric(value).is_some() {
                counts.numeric += 1;
            }
        }
        counts
    }

    pub fn numeric_ratio(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.numeric as f64 / self.non_empty as f64
        }
    }

    pub fn column_type(self) -> ColumnType {
        if self.non_empty > 0 && self.numeric_ratio() > NUMERIC_RATIO_THRESHOLD {
            ColumnType::Numeric
        } else {
            ColumnType::Categorical
        }
    }
}

/// Classify a column from its raw cell strings. Empty cells never count.
pub fn classify_column<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnType {
    ColumnCounts::from_values(values).column_type()
}

/// Tag a raw cell according to its column's type.
pub fn to_cell(raw: &str, column_type: ColumnType) -> Cell {
    if raw.is_empty() {
        return Cell::Empty;
    }
    match column_type {
        ColumnType::Numeric => match parse_numeric(raw) {
            Some(value) => Cell::Numeric(value),
            None => Cell::Text(raw.to_string()),
        },
        ColumnType::Categorical => Cell::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(numeric: usize, text: usize, empty: usize) -> Vec<String> {
        let mut values = Vec::new();
        values.extend((0..numeric).map(|i| i.to_string()));
        values.extend((0..text).map(|i| format!("label{i}")));
        values.extend((0..empty).map(|_| String::new()));
        values
    }

    #[test]
    fn seventy_nine_percent_is_categorical() {
        let values = column(79, 21, 0);
        assert_eq!(
            classify_column(values.iter().map(String::as_str)),
            ColumnType::Categorical
        );
    }

    #[test]
    fn eighty_one_percent_is_numeric() {
        let values = column(81, 19, 0);
        assert_eq!(
            classify_column(values.iter().map(String::as_str)),
            ColumnType::Numeric
        );
    }

    #[test]
    fn exactly_eighty_percent_is_categorical() {
        let values = column(4, 1, 0);
        assert_eq!(
            classify_column(values.iter().map(String::as_str)),
            ColumnType::Categorical
        );
    }

    #[test]
    fn empty_cells_do_not_count_against_ratio() {
        let values = column(9, 1, 50);
        assert_eq!(
            classify_column(values.iter().map(String::as_str)),
            ColumnType::Numeric
        );
    }

    #[test]
    fn all_empty_column_is_categorical() {
        let values = column(0, 0, 5);
        assert_eq!(
            classify_column(values.iter().map(String::as_str)),
            ColumnType::Categorical
        );
    }

    #[test]
    fn non_finite_values_are_not_numeric() {
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("-2.5e3"), Some(-2500.0));
        assert_eq!(parse_numeric("12abc"), None);
    }

    #[test]
    fn unit_suffixes_make_a_column_categorical() {
        let values = ["10kg", "12kg", "5 kg", "12%"];
        assert!(values.iter().all(|value| parse_numeric(value).is_none()));
        assert_eq!(classify_column(values), ColumnType::Categorical);
    }

    #[test]
    fn categorical_cells_keep_raw_text() {
        assert_eq!(
            to_cell("007", ColumnType::Categorical),
            Cell::Text("007".to_string())
        );
        assert_eq!(to_cell("7", ColumnType::Numeric), Cell::Numeric(7.0));
        assert_eq!(
            to_cell("n/a", ColumnType::Numeric),
            Cell::Text("n/a".to_string())
        );
        assert_eq!(to_cell("", ColumnType::Numeric), Cell::Empty);
    }
}
