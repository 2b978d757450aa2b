//! Tests for tabula-model types.

use chrono::{TimeZone, Utc};
use tabula_model::{
    AnalysisId, AnalysisRecord, CategoricalColumnStats, Cell, CorrelationPair, DatasetId,
    InsightStatus, NewAnalysis, Statistics, UserId, ValueCount,
};

fn new_analysis(correlations: Option<Vec<CorrelationPair>>) -> NewAnalysis {
    NewAnalysis {
        dataset_id: DatasetId::new("ds-1").expect("dataset id"),
        user_id: UserId::new("user-1").expect("user id"),
        dataset_name: None,
        profile: None,
        statistics: Statistics {
            numerical: vec![],
            categorical: vec![CategoricalColumnStats {
                column: "category".to_string(),
                unique_count: 2,
                top_values: vec![
                    ValueCount {
                        value: "A".to_string(),
                        count: 2,
                    },
                    ValueCount {
                        value: "B".to_string(),
                        count: 1,
                    },
                ],
            }],
        },
        correlations,
        ai_insights: Some(vec!["Dataset contains 1 column.".to_string()]),
    }
}

#[test]
fn ids_reject_blank_values() {
    assert!(DatasetId::new("   ").is_err());
    assert!(UserId::new("").is_err());
    assert_eq!(DatasetId::new("  ds-7 ").unwrap().as_str(), "ds-7");
}

#[test]
fn analysis_id_parse_accepts_generated_ids() {
    let id = AnalysisId::generate();
    let parsed = AnalysisId::parse(id.as_str()).expect("parse generated id");
    assert_eq!(parsed, id);
    assert!(AnalysisId::parse("not-a-uuid").is_err());
}

#[test]
fn record_serializes_with_camel_case_fields() {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
    let record = AnalysisRecord::from_new(AnalysisId::generate(), new_analysis(None), created_at);
    let json = serde_json::to_value(&record).expect("serialize record");

    assert_eq!(json["datasetId"], "ds-1");
    assert_eq!(json["userId"], "user-1");
    assert_eq!(json["statistics"]["categorical"][0]["uniqueCount"], 2);
    assert_eq!(json["statistics"]["categorical"][0]["topValues"][0]["value"], "A");
    assert_eq!(json["insightStatus"], "deterministic");
    assert!(json.get("correlations").is_none());
    assert!(json.get("updatedAt").is_none());
}

#[test]
fn record_round_trips_through_json() {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
    let pairs = vec![CorrelationPair {
        column1: "x".to_string(),
        column2: "y".to_string(),
        correlation: -0.5,
    }];
    let record =
        AnalysisRecord::from_new(AnalysisId::generate(), new_analysis(Some(pairs)), created_at);
    let json = serde_json::to_string(&record).expect("serialize");
    let round: AnalysisRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(round, record);
}

#[test]
fn replace_insights_overwrites_instead_of_merging() {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
    let mut record =
        AnalysisRecord::from_new(AnalysisId::generate(), new_analysis(None), created_at);
    let later = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    record.replace_insights(vec!["Only this".to_string()], InsightStatus::Enhanced, later);

    assert_eq!(record.ai_insights, Some(vec!["Only this".to_string()]));
    assert_eq!(record.insight_status, InsightStatus::Enhanced);
    assert_eq!(record.updated_at, Some(later));
}

#[test]
fn cell_serializes_as_tagged_variant() {
    let json = serde_json::to_string(&Cell::Numeric(2.5)).unwrap();
    assert_eq!(json, r#"{"kind":"Numeric","value":2.5}"#);
    let empty = serde_json::to_string(&Cell::Empty).unwrap();
    assert_eq!(empty, r#"{"kind":"Empty"}"#);
}
