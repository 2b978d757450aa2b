//! Column statistics and correlation.
//!
//! - [`compute_statistics`] summarizes every column of a [`Dataset`](tabula_model::Dataset):
//!   mean / median / population std / min / max / count for numeric columns and
//!   value frequencies for categorical ones.
//! - [`correlate`] computes Pearson coefficients for every pair of numeric
//!   columns, dropping degenerate pairs instead of reporting them as zero.
//!
//! Degenerate inputs are never errors; they simply produce no output.

pub mod correlation;
pub mod descriptive;

pub use correlation::{correlate, pearson};
pub use descriptive::{TOP_VALUES_LIMIT, categorical_stats, compute_statistics, numeric_stats};
