use std::sync::Arc;

use tabula_model::{
    CorrelationPair, DatasetId, InsightStatus, NewAnalysis, NumericColumnStats, Statistics, UserId,
};
use tabula_store::{AnalysisStore, JsonFileStore, MemoryStore, StoreError};
use tempfile::tempdir;

fn sample() -> NewAnalysis {
    NewAnalysis {
        dataset_id: DatasetId::new("sales-2024").unwrap(),
        user_id: UserId::new("analyst").unwrap(),
        dataset_name: None,
        profile: None,
        statistics: Statistics {
            numerical: vec![NumericColumnStats {
                column: "price".to_string(),
                mean: 55.0,
                median: 60.0,
                std: 28.72,
                min: 10.0,
                max: 100.0,
                count: 10,
            }],
            categorical: vec![],
        },
        correlations: Some(vec![CorrelationPair {
            column1: "price".to_string(),
            column2: "qty".to_string(),
            correlation: -0.5,
        }]),
        ai_insights: Some(vec!["Dataset contains 1 column: 1 numeric and 0 categorical.".to_string()]),
    }
}

async fn exercise(store: Arc<dyn AnalysisStore>) {
    let id = store.create_analysis(sample()).await.unwrap();

    let created = store.get_analysis_by_id(&id).await.unwrap().unwrap();
    assert_eq!(created.insight_status, InsightStatus::Deterministic);
    assert_eq!(created.statistics, sample().statistics);
    assert!(created.updated_at.is_none());

    store
        .update_insights(&id, vec!["first".to_string()], InsightStatus::Fallback)
        .await
        .unwrap();
    store
        .update_insights(&id, vec!["second".to_string()], InsightStatus::Enhanced)
        .await
        .unwrap();

    let dataset = DatasetId::new("sales-2024").unwrap();
    let updated = store.get_analysis(&dataset).await.unwrap().unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.ai_insights, Some(vec!["second".to_string()]));
    assert_eq!(updated.insight_status, InsightStatus::Enhanced);
    assert_eq!(updated.correlations, sample().correlations);
}

#[tokio::test]
async fn memory_store_contract() {
    exercise(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn file_store_contract() {
    let dir = tempdir().unwrap();
    exercise(Arc::new(JsonFileStore::open(dir.path()).unwrap())).await;
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let id = {
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.create_analysis(sample()).await.unwrap()
    };

    let reopened = JsonFileStore::open(dir.path()).unwrap();
    let record = reopened.get_analysis_by_id(&id).await.unwrap().unwrap();
    assert_eq!(record.dataset_id.as_str(), "sales-2024");

    let raw = std::fs::read_to_string(dir.path().join(format!("{id}.json"))).unwrap();
    assert!(raw.contains("\"datasetId\": \"sales-2024\""));
    assert!(raw.contains("\"aiInsights\""));
}

#[tokio::test]
async fn file_store_update_of_unknown_id() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    let err = store
        .update_insights(
            &tabula_model::AnalysisId::generate(),
            vec![],
            InsightStatus::Fallback,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

async fn rejects_non_finite(store: Arc<dyn AnalysisStore>) {
    let mut overflowed = sample();
    overflowed.statistics.numerical[0].std = f64::INFINITY;
    let err = store.create_analysis(overflowed).await.unwrap_err();
    assert!(matches!(&err, StoreError::NonFinite { field } if field == "column 'price'"));

    let mut undefined = sample();
    if let Some(pairs) = undefined.correlations.as_mut() {
        pairs[0].correlation = f64::NAN;
    }
    let err = store.create_analysis(undefined).await.unwrap_err();
    assert!(matches!(err, StoreError::NonFinite { .. }));

    let dataset = DatasetId::new("sales-2024").unwrap();
    assert!(store.get_analysis(&dataset).await.unwrap().is_none());
}

#[tokio::test]
async fn memory_store_rejects_non_finite_statistics() {
    rejects_non_finite(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn file_store_rejects_non_finite_statistics() {
    let dir = tempdir().unwrap();
    rejects_non_finite(Arc::new(JsonFileStore::open(dir.path()).unwrap())).await;
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
