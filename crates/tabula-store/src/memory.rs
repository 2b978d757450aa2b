//! In-process store for tests and one-shot runs.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tabula_model::{AnalysisId, AnalysisRecord, DatasetId, InsightStatus, NewAnalysis};

use crate::error::{Result, StoreError};
use crate::gateway::{AnalysisStore, ensure_finite, latest};

/// Records held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn create_analysis(&self, analysis: NewAnalysis) -> Result<AnalysisId> {
        ensure_finite(&analysis)?;
        let id = AnalysisId::generate();
        let record = AnalysisRecord::from_new(id.clone(), analysis, Utc::now());
        self.records.write().await.push(record);
        tracing::debug!(analysis_id = %id, "created analysis in memory");
        Ok(id)
    }

    async fn get_analysis(&self, dataset_id: &DatasetId) -> Result<Option<AnalysisRecord>> {
        let records = self.records.read().await;
        let found = latest(
            records
                .iter()
                .filter(|record| &record.dataset_id == dataset_id),
        );
        Ok(found.cloned())
    }

    async fn get_analysis_by_id(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    async fn update_insights(
        &self,
        id: &AnalysisId,
        insights: Vec<String>,
        status: InsightStatus,
    ) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        record.replace_insights(insights, status, Utc::now());
        Ok(())
    }
}
