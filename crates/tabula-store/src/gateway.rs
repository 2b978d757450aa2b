//! The persistence seam used by the analysis pipeline.

use async_trait::async_trait;
use tabula_model::{AnalysisId, AnalysisRecord, DatasetId, InsightStatus, NewAnalysis};

use crate::error::{Result, StoreError};

/// Storage for analysis records.
///
/// No transactions or locking are implied beyond what each adapter documents;
/// `update_insights` is last-write-wins.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist a new record and return its identifier.
    async fn create_analysis(&self, analysis: NewAnalysis) -> Result<AnalysisId>;

    /// Most recently created record for a dataset.
    async fn get_analysis(&self, dataset_id: &DatasetId) -> Result<Option<AnalysisRecord>>;

    async fn get_analysis_by_id(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>>;

    /// Replace the stored insights wholesale.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) for an
    /// unknown id.
    async fn update_insights(
        &self,
        id: &AnalysisId,
        insights: Vec<String>,
        status: InsightStatus,
    ) -> Result<()>;
}

/// Pick the newest record; later entries win ties.
pub(crate) fn latest<'a>(
    records: impl IntoIterator<Item = &'a AnalysisRecord>,
) -> Option<&'a AnalysisRecord> {
    records.into_iter().max_by_key(|record| record.created_at)
}

/// Reject records whose statistics or correlations are not finite.
pub(crate) fn ensure_finite(analysis: &NewAnalysis) -> Result<()> {
    if let Some(column) = analysis.statistics.non_finite_column() {
        return Err(StoreError::NonFinite {
            field: format!("column '{column}'"),
        });
    }
    let pairs = analysis.correlations.as_deref().unwrap_or_default();
    if let Some(pair) = pairs.iter().find(|pair| !pair.correlation.is_finite()) {
        return Err(StoreError::NonFinite {
            field: format!("correlation '{}' / '{}'", pair.column1, pair.column2),
        });
    }
    Ok(())
}
