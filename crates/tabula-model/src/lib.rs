//! Core data model for tabular profiling.
//!
//! Types in this crate are shared by the ingestor, the statistics engine, the
//! insight synthesizer and the persistence gateway. Serialized field names
//! follow the camelCase shape of stored analysis records.

pub mod analysis;
pub mod error;
pub mod ids;
pub mod statistics;
pub mod table;

pub use analysis::{AnalysisRecord, InsightStatus, NewAnalysis};
pub use error::{ModelError, Result};
pub use ids::{AnalysisId, DatasetId, UserId};
pub use statistics::{
    CategoricalColumnStats, CorrelationPair, NumericColumnStats, Statistics, ValueCount,
};
pub use table::{Cell, Column, ColumnType, Dataset, DatasetProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_column_counts() {
        let statistics = Statistics {
            numerical: vec![NumericColumnStats {
                column: "price".to_string(),
                mean: 10.0,
                median: 10.0,
                std: 0.0,
                min: 10.0,
                max: 10.0,
                count: 3,
            }],
            categorical: vec![],
        };
        assert_eq!(statistics.column_count(), 1);
        assert!(!statistics.is_empty());
        assert!(Statistics::default().is_empty());
    }
}
