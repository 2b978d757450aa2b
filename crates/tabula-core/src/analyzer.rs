//! The analysis pipeline.
//!
//! `analyze` runs ingest, statistics, correlation and deterministic insights
//! on the caller's task and persists the result. Enhancement then runs in the
//! background through the [`EnhancementDispatcher`] and replaces the stored
//! insights with provider output or the fallback list.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::Instrument;

use tabula_ingest::{IngestError, ingest};
use tabula_insights::{
    GenerationRequest, InsightProvider, ProviderError, build_prompt, deterministic_insights,
    fallback_insights, finalize_insights, parse_response,
};
use tabula_model::{
    AnalysisId, AnalysisRecord, CorrelationPair, DatasetId, DatasetProfile, InsightStatus,
    NewAnalysis, Statistics, UserId,
};
use tabula_stats::{compute_statistics, correlate};
use tabula_store::{AnalysisStore, StoreError};

use crate::config::TabulaConfig;
use crate::dispatch::EnhancementDispatcher;
use crate::error::Result;

const REDACTED_VALUE: &str = "[REDACTED]";

/// Input to [`Analyzer::analyze`].
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub dataset_id: String,
    pub user_id: String,
    pub raw_text: String,
    pub dataset_name: Option<String>,
}

/// Result of the synchronous pipeline.
#[derive(Debug)]
pub struct AnalyzeResponse {
    pub analysis_id: AnalysisId,
    pub profile: DatasetProfile,
    pub statistics: Statistics,
    pub correlations: Option<Vec<CorrelationPair>>,
    /// Deterministic insights stored with the new record.
    pub insights: Vec<String>,
    /// Handle to the background enhancement, when one was dispatched.
    pub enhancement: Option<JoinHandle<Option<EnhancementOutcome>>>,
}

/// Input to [`Analyzer::enhance`].
#[derive(Debug, Clone)]
pub struct EnhanceRequest {
    pub analysis_id: AnalysisId,
    pub statistics: Statistics,
    pub correlations: Option<Vec<CorrelationPair>>,
    pub dataset_name: String,
    pub profile: DatasetProfile,
}

impl EnhanceRequest {
    /// Rebuild a request from a stored record.
    ///
    /// Records written without a profile get one derived from their statistics.
    pub fn from_record(record: &AnalysisRecord) -> Self {
        let profile = record.profile.unwrap_or_else(|| DatasetProfile {
            row_count: record
                .statistics
                .numerical
                .iter()
                .map(|col| col.count)
                .max()
                .unwrap_or(0),
            column_count: record.statistics.column_count(),
        });
        Self {
            analysis_id: record.id.clone(),
            statistics: record.statistics.clone(),
            correlations: record.correlations.clone(),
            dataset_name: record
                .dataset_name
                .clone()
                .unwrap_or_else(|| record.dataset_id.to_string()),
            profile,
        }
    }
}

/// Where the final insights of an enhancement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsightSource {
    /// Provider output, read by the named parse strategy.
    Provider { strategy: &'static str },
    /// Fallback list, with the provider failure kind and a note for users.
    Fallback {
        reason: &'static str,
        message: &'static str,
    },
}

impl InsightSource {
    pub fn status(self) -> InsightStatus {
        match self {
            Self::Provider { .. } => InsightStatus::Enhanced,
            Self::Fallback { .. } => InsightStatus::Fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancementOutcome {
    pub insights: Vec<String>,
    pub source: InsightSource,
}

/// Runs analyses against a store and an insight provider.
///
/// Cheap to clone; clones share the store, provider and dispatcher.
#[derive(Clone)]
pub struct Analyzer {
    store: Arc<dyn AnalysisStore>,
    provider: Arc<dyn InsightProvider>,
    dispatcher: EnhancementDispatcher,
    config: Arc<TabulaConfig>,
    log_data: bool,
}

impl Analyzer {
    pub fn new(
        config: TabulaConfig,
        store: Arc<dyn AnalysisStore>,
        provider: Arc<dyn InsightProvider>,
    ) -> Self {
        let dispatcher = EnhancementDispatcher::new(config.enhancement.max_concurrent);
        Self {
            store,
            provider,
            dispatcher,
            config: Arc::new(config),
            log_data: false,
        }
    }

    /// Allow prompt text to appear in trace logs.
    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    pub fn config(&self) -> &TabulaConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn AnalysisStore> {
        &self.store
    }

    /// Ingest, profile and persist a dataset.
    ///
    /// Enhancement is dispatched after the record exists when it is enabled
    /// in the configuration; the returned handle may be awaited or dropped.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Input`](crate::AnalysisError::Input) for missing ids or
    /// unreadable text, [`AnalysisError::Persistence`](crate::AnalysisError::Persistence)
    /// when the record cannot be created.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse> {
        let span = tracing::info_span!("analyze", dataset_id = %request.dataset_id);
        self.analyze_inner(request).instrument(span).await
    }

    async fn analyze_inner(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse> {
        let dataset_id = DatasetId::new(request.dataset_id)
            .map_err(|_| IngestError::MissingField { field: "datasetId" })?;
        let user_id = UserId::new(request.user_id)
            .map_err(|_| IngestError::MissingField { field: "userId" })?;
        let dataset_name = request
            .dataset_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let dataset = ingest(&request.raw_text)?;
        tracing::debug!(
            rows = dataset.profile.row_count,
            columns = dataset.profile.column_count,
            "ingested"
        );

        let statistics = compute_statistics(&dataset);
        let correlations = correlate(&dataset);
        tracing::debug!(
            numeric = statistics.numerical.len(),
            categorical = statistics.categorical.len(),
            pairs = correlations.as_ref().map_or(0, Vec::len),
            "computed statistics"
        );

        let insights = deterministic_insights(&statistics, correlations.as_deref());
        let profile = dataset.profile;

        let analysis_id = self
            .store
            .create_analysis(NewAnalysis {
                dataset_id: dataset_id.clone(),
                user_id,
                dataset_name: dataset_name.clone(),
                profile: Some(profile),
                statistics: statistics.clone(),
                correlations: correlations.clone(),
                ai_insights: Some(insights.clone()),
            })
            .await?;
        tracing::info!(analysis_id = %analysis_id, insights = insights.len(), "analysis created");

        let enhancement = self.config.enhancement.enabled.then(|| {
            self.dispatch(EnhanceRequest {
                analysis_id: analysis_id.clone(),
                statistics: statistics.clone(),
                correlations: correlations.clone(),
                dataset_name: dataset_name.unwrap_or_else(|| dataset_id.to_string()),
                profile,
            })
        });

        Ok(AnalyzeResponse {
            analysis_id,
            profile,
            statistics,
            correlations,
            insights,
            enhancement,
        })
    }

    /// Run [`enhance`](Self::enhance) in the background.
    pub fn dispatch(&self, request: EnhanceRequest) -> JoinHandle<Option<EnhancementOutcome>> {
        let analyzer = self.clone();
        let analysis_id = request.analysis_id.clone();
        self.dispatcher
            .spawn(analysis_id, async move { analyzer.enhance(request).await })
    }

    /// Produce and persist enhanced insights.
    ///
    /// Never fails: provider errors switch to the fallback list, and a failed
    /// store update is logged and the outcome still returned.
    pub async fn enhance(&self, request: EnhanceRequest) -> EnhancementOutcome {
        let EnhanceRequest {
            analysis_id,
            statistics,
            correlations,
            dataset_name,
            profile,
        } = request;
        let correlations = correlations.as_deref();
        let limits = self.config.insights;

        let prompt = build_prompt(&dataset_name, profile, &statistics, correlations);
        let logged_prompt = if self.log_data {
            prompt.as_str()
        } else {
            REDACTED_VALUE
        };
        tracing::trace!(
            provider = self.provider.name(),
            prompt = logged_prompt,
            "requesting insights"
        );
        let generation = GenerationRequest {
            prompt,
            temperature: self.config.provider.temperature,
            max_output_tokens: self.config.provider.max_output_tokens,
        };

        let filler = deterministic_insights(&statistics, correlations);
        let outcome = match self.generate(&generation).await {
            Ok((strategy, items)) => EnhancementOutcome {
                insights: finalize_insights(items, &filler, limits),
                source: InsightSource::Provider { strategy },
            },
            Err(err) => {
                tracing::warn!(
                    analysis_id = %analysis_id,
                    error = %err,
                    retryable = err.is_retryable(),
                    "insight provider failed, using fallback insights"
                );
                EnhancementOutcome {
                    insights: finalize_insights(
                        fallback_insights(profile, &statistics, correlations),
                        &filler,
                        limits,
                    ),
                    source: InsightSource::Fallback {
                        reason: err.kind(),
                        message: err.user_message(),
                    },
                }
            }
        };

        match self
            .store
            .update_insights(&analysis_id, outcome.insights.clone(), outcome.source.status())
            .await
        {
            Ok(()) => tracing::info!(
                analysis_id = %analysis_id,
                status = outcome.source.status().label(),
                insights = outcome.insights.len(),
                "insights updated"
            ),
            Err(err) => tracing::error!(
                analysis_id = %analysis_id,
                error = %err,
                "failed to persist enhanced insights"
            ),
        }
        outcome
    }

    /// Re-run enhancement for a stored analysis.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no record has this id, or any error from
    /// the lookup itself.
    pub async fn enhance_stored(&self, analysis_id: &AnalysisId) -> Result<EnhancementOutcome> {
        let record = self
            .store
            .get_analysis_by_id(analysis_id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                id: analysis_id.to_string(),
            })?;
        Ok(self.enhance(EnhanceRequest::from_record(&record)).await)
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<(&'static str, Vec<String>), ProviderError> {
        let text = self.provider.generate(request).await?;
        let parsed = parse_response(&text).ok_or(ProviderError::Unparsable)?;
        Ok((parsed.strategy, parsed.items))
    }
}
