//! Per-column statistics and pairwise correlation results.

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericColumnStats {
    pub column: String,
    pub mean: f64,
    /// Element at `floor(n / 2)` of the sorted values (upper middle for even `n`).
    pub median: f64,
    /// Population standard deviation (divides by `n`).
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl NumericColumnStats {
    /// True when every reported figure is finite and so survives JSON.
    pub fn is_finite(&self) -> bool {
        [self.mean, self.median, self.std, self.min, self.max]
            .iter()
            .all(|value| value.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalColumnStats {
    pub column: String,
    pub unique_count: usize,
    /// At most ten entries, count descending, ties in first-seen order.
    pub top_values: Vec<ValueCount>,
}

impl CategoricalColumnStats {
    pub fn most_frequent(&self) -> Option<&ValueCount> {
        self.top_values.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Statistics {
    pub numerical: Vec<NumericColumnStats>,
    pub categorical: Vec<CategoricalColumnStats>,
}

impl Statistics {
    pub fn column_count(&self) -> usize {
        self.numerical.len() + self.categorical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numerical.is_empty() && self.categorical.is_empty()
    }

    /// First numeric column holding a non-finite figure.
    pub fn non_finite_column(&self) -> Option<&str> {
        self.numerical
            .iter()
            .find(|stats| !stats.is_finite())
            .map(|stats| stats.column.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CorrelationPair {
    pub column1: String,
    pub column2: String,
    pub correlation: f64,
}

impl CorrelationPair {
    pub fn strength(&self) -> f64 {
        self.correlation.abs()
    }
}
