use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use tabula_cli::logging::redact_value;
use tabula_cli::summary::{AnalysisReport, print_report};
use tabula_core::{AnalyzeRequest, Analyzer, EnhancementOutcome, InsightSource, TabulaConfig};
use tabula_insights::GeminiProvider;
use tabula_model::{
    AnalysisId, CorrelationPair, DatasetId, DatasetProfile, InsightStatus, Statistics,
};
use tabula_store::{AnalysisStore, JsonFileStore, MemoryStore};

use crate::cli::{AnalyzeArgs, Cli, Command, EnhanceArgs, ShowArgs};

/// JSON shape printed by `analyze --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOutput<'a> {
    analysis_id: &'a AnalysisId,
    dataset_id: &'a str,
    profile: DatasetProfile,
    statistics: &'a Statistics,
    correlations: Option<&'a [CorrelationPair]>,
    insights: &'a [String],
    insight_status: InsightStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    enhancement: Option<&'a EnhancementOutcome>,
}

/// Build the analyzer from configuration and global flags.
pub fn build_analyzer(cli: &Cli) -> Result<Analyzer> {
    let mut config = TabulaConfig::load(cli.config.as_deref()).context("load configuration")?;
    if let Command::Analyze(args) = &cli.command
        && args.no_enhance
    {
        config.enhancement.enabled = false;
    }
    let store = open_store(cli, &config)?;
    if config.provider.api_key().is_none() {
        tracing::info!("no provider credential configured, enhancement will use fallback insights");
    }
    let provider =
        GeminiProvider::new(config.provider.clone()).context("create insight provider")?;
    Ok(Analyzer::new(config, store, Arc::new(provider)).with_log_data(cli.log_data))
}

fn open_store(cli: &Cli, config: &TabulaConfig) -> Result<Arc<dyn AnalysisStore>> {
    let dir = cli.store_dir.clone().or_else(|| config.store.resolve_dir());
    match dir {
        Some(dir) => {
            let store = JsonFileStore::open(&dir)
                .with_context(|| format!("open analysis store at {}", dir.display()))?;
            tracing::debug!(root = %store.root().display(), "using file store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("no data directory available, analyses will not be kept");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub async fn run_analyze(analyzer: &Analyzer, args: &AnalyzeArgs) -> Result<()> {
    let raw_text = tabula_ingest::read_text(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let dataset_id = match &args.dataset_id {
        Some(id) => id.clone(),
        None => file_stem(&args.file)?,
    };
    tracing::info!(
        file = %args.file.display(),
        dataset_id = %dataset_id,
        name = redact_value(args.dataset_name.as_deref().unwrap_or_default()),
        "analyzing"
    );

    let mut response = analyzer
        .analyze(AnalyzeRequest {
            dataset_id: dataset_id.clone(),
            user_id: args.user_id.clone(),
            raw_text,
            dataset_name: args.dataset_name.clone(),
        })
        .await
        .map_err(|err| anyhow!(err.user_message()))?;

    let enhancement = match response.enhancement.take() {
        Some(handle) => handle.await.context("enhancement task")?,
        None => None,
    };
    let (insights, status) = match &enhancement {
        Some(outcome) => (outcome.insights.as_slice(), outcome.source.status()),
        None => (response.insights.as_slice(), InsightStatus::Deterministic),
    };

    if args.json {
        let output = AnalyzeOutput {
            analysis_id: &response.analysis_id,
            dataset_id: &dataset_id,
            profile: response.profile,
            statistics: &response.statistics,
            correlations: response.correlations.as_deref(),
            insights,
            insight_status: status,
            enhancement: enhancement.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if let Some(outcome) = &enhancement {
            print_fallback_notice(outcome);
        }
        let name = args.dataset_name.as_deref().unwrap_or(&dataset_id);
        print_report(&AnalysisReport {
            analysis_id: &response.analysis_id,
            dataset: name,
            profile: Some(response.profile),
            statistics: &response.statistics,
            correlations: response.correlations.as_deref(),
            insights,
            status,
        });
    }
    Ok(())
}

pub async fn run_show(analyzer: &Analyzer, args: &ShowArgs) -> Result<()> {
    let dataset_id = DatasetId::new(args.dataset_id.clone())
        .map_err(|_| anyhow!("dataset id must not be empty"))?;
    let record = analyzer
        .store()
        .get_analysis(&dataset_id)
        .await
        .map_err(|err| anyhow!(err.user_message()))?
        .ok_or_else(|| anyhow!("no analysis stored for dataset '{dataset_id}'"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_report(&AnalysisReport::from_record(&record));
    }
    Ok(())
}

pub async fn run_enhance(analyzer: &Analyzer, args: &EnhanceArgs) -> Result<()> {
    let analysis_id = AnalysisId::parse(&args.analysis_id)
        .map_err(|_| anyhow!("'{}' is not a valid analysis id", args.analysis_id))?;
    let outcome = analyzer
        .enhance_stored(&analysis_id)
        .await
        .map_err(|err| anyhow!(err.user_message()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_fallback_notice(&outcome);
        println!(
            "{}",
            tabula_cli::summary::insight_table(&outcome.insights, outcome.source.status())
        );
    }
    Ok(())
}

fn print_fallback_notice(outcome: &EnhancementOutcome) {
    if let InsightSource::Fallback { message, .. } = outcome.source {
        eprintln!("note: {message}");
    }
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| anyhow!("cannot derive a dataset id from {}", path.display()))
}
