//! Prompt construction for the external provider.

use std::fmt::Write as _;

use tabula_model::{CorrelationPair, DatasetProfile, Statistics};

/// Correlations weaker than this are left out of the prompt.
pub const NOTABLE_CORRELATION: f64 = 0.3;

/// At most this many correlations are included.
pub const MAX_PROMPT_CORRELATIONS: usize = 5;

/// Render the dataset summary block sent to the provider.
#[must_use]
pub fn data_summary(
    dataset_name: &str,
    profile: DatasetProfile,
    statistics: &Statistics,
    correlations: Option<&[CorrelationPair]>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dataset Analysis Summary for \"{dataset_name}\":");
    out.push('\n');
    out.push_str("Dataset Overview:\n");
    let _ = writeln!(out, "- Total rows: {}", profile.row_count);
    let _ = writeln!(out, "- Total columns: {}", profile.column_count);
    let _ = writeln!(out, "- Numerical columns: {}", statistics.numerical.len());
    let _ = writeln!(out, "- Categorical columns: {}", statistics.categorical.len());

    if !statistics.numerical.is_empty() {
        out.push_str("\nNumerical Columns Analysis:\n");
        for col in &statistics.numerical {
            let _ = writeln!(
                out,
                "- {}: mean={:.4}, std={:.4}, range=[{}, {}]",
                col.column, col.mean, col.std, col.min, col.max
            );
        }
    }

    if !statistics.categorical.is_empty() {
        out.push_str("\nCategorical Columns Analysis:\n");
        for col in &statistics.categorical {
            match col.most_frequent() {
                Some(top) => {
                    let _ = writeln!(
                        out,
                        "- {}: {} unique values, most frequent: \"{}\" ({} times)",
                        col.column, col.unique_count, top.value, top.count
                    );
                }
                None => {
                    let _ = writeln!(out, "- {}: no values", col.column);
                }
            }
        }
    }

    let notable: Vec<&CorrelationPair> = correlations
        .unwrap_or_default()
        .iter()
        .filter(|pair| pair.strength() > NOTABLE_CORRELATION)
        .take(MAX_PROMPT_CORRELATIONS)
        .collect();
    if !notable.is_empty() {
        out.push_str("\nCorrelations Found:\n");
        for pair in notable {
            let _ = writeln!(
                out,
                "- {} <-> {}: {:.4}",
                pair.column1, pair.column2, pair.correlation
            );
        }
    }

    out
}

/// Build the full instruction prompt.
///
/// The provider is asked for a JSON array of strings; the parser chain still
/// accepts bullet lists when the model ignores that.
#[must_use]
pub fn build_prompt(
    dataset_name: &str,
    profile: DatasetProfile,
    statistics: &Statistics,
    correlations: Option<&[CorrelationPair]>,
) -> String {
    let summary = data_summary(dataset_name, profile, statistics, correlations);
    format!(
        "As a data analyst, analyze the following dataset summary and provide 5-7 key insights about the data.\n\
         Focus on:\n\
         1. Data quality observations\n\
         2. Interesting patterns or trends\n\
         3. Potential business implications\n\
         4. Statistical significance of findings\n\
         5. Recommendations for further analysis\n\
         6. Data anomalies or outliers\n\
         7. Relationships between variables\n\
         \n\
         {summary}\n\
         Respond with a JSON array of strings only, one insight per element, each 1-2 sentences long.\n\
         Be specific and actionable. Do not include generic statements; focus on the actual data characteristics shown.\n"
    )
}
