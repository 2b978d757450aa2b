//! Persisted analysis records.

use chrono::{DateTime, Utc};

use crate::ids::{AnalysisId, DatasetId, UserId};
use crate::statistics::{CorrelationPair, Statistics};
use crate::table::DatasetProfile;

/// Where the currently stored insights came from.
///
/// A record stays `Deterministic` until an enhancement task persists its
/// result; a task that dies before persisting leaves it unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightStatus {
    #[default]
    Deterministic,
    Enhanced,
    Fallback,
}

impl InsightStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::Enhanced => "enhanced",
            Self::Fallback => "fallback",
        }
    }
}

/// Fields supplied by the pipeline when an analysis is first created.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalysis {
    pub dataset_id: DatasetId,
    pub user_id: UserId,
    /// Display name used when prompting the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<DatasetProfile>,
    pub statistics: Statistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlations: Option<Vec<CorrelationPair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<Vec<String>>,
}

/// A stored analysis as returned by the persistence gateway.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub dataset_id: DatasetId,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<DatasetProfile>,
    pub statistics: Statistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlations: Option<Vec<CorrelationPair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<Vec<String>>,
    #[serde(default)]
    pub insight_status: InsightStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AnalysisRecord {
    pub fn from_new(id: AnalysisId, analysis: NewAnalysis, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            dataset_id: analysis.dataset_id,
            user_id: analysis.user_id,
            dataset_name: analysis.dataset_name,
            profile: analysis.profile,
            statistics: analysis.statistics,
            correlations: analysis.correlations,
            ai_insights: analysis.ai_insights,
            insight_status: InsightStatus::Deterministic,
            created_at,
            updated_at: None,
        }
    }

    /// Replace the stored insights wholesale.
    pub fn replace_insights(
        &mut self,
        insights: Vec<String>,
        status: InsightStatus,
        now: DateTime<Utc>,
    ) {
        self.ai_insights = Some(insights);
        self.insight_status = status;
        self.updated_at = Some(now);
    }
}
