//! Insights used when the provider is unavailable.

use tabula_model::{CorrelationPair, DatasetProfile, Statistics};

use crate::prompt::NOTABLE_CORRELATION;

/// Datasets with fewer rows are called out as small.
pub const SMALL_DATASET_ROWS: usize = 100;

/// Datasets with more rows are called out as large.
pub const LARGE_DATASET_ROWS: usize = 10_000;

/// Build the fallback list from dataset shape alone.
///
/// Pure: identical inputs always give identical output.
#[must_use]
pub fn fallback_insights(
    profile: DatasetProfile,
    statistics: &Statistics,
    correlations: Option<&[CorrelationPair]>,
) -> Vec<String> {
    let mut insights = Vec::new();

    if profile.row_count < SMALL_DATASET_ROWS {
        insights.push(
            "Small dataset detected - consider collecting more data for robust statistical analysis."
                .to_string(),
        );
    } else if profile.row_count > LARGE_DATASET_ROWS {
        insights.push(
            "Large dataset provides good statistical power for analysis and modeling.".to_string(),
        );
    }

    let numeric = statistics.numerical.len();
    let categorical = statistics.categorical.len();
    if numeric > categorical {
        insights.push(
            "Dataset is predominantly numerical, suitable for statistical modeling and regression analysis."
                .to_string(),
        );
    } else if categorical > numeric {
        insights.push(
            "High proportion of categorical data suggests focus on classification or segmentation analysis."
                .to_string(),
        );
    }

    let notable = correlations
        .unwrap_or_default()
        .iter()
        .any(|pair| pair.strength() > NOTABLE_CORRELATION);
    if notable {
        insights.push(
            "Correlations detected between variables - investigate for potential multicollinearity in modeling."
                .to_string(),
        );
    }

    insights.push(
        "Data preprocessing may be needed before advanced analysis - check for missing values and outliers."
            .to_string(),
    );
    insights.push(
        "Consider creating data visualizations to better understand variable distributions and relationships."
            .to_string(),
    );
    insights
}
