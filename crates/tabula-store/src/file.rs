//! JSON-file store: one document per analysis under a directory.
//!
//! Layout: `<root>/<analysis-id>.json`. Writes go through a temp file and a
//! rename so readers never see a partial document. All file access runs on
//! the blocking pool.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use tabula_model::{AnalysisId, AnalysisRecord, DatasetId, InsightStatus, NewAnalysis};

use crate::error::{Result, StoreError};
use crate::gateway::{AnalysisStore, ensure_finite, latest};

const RECORD_EXTENSION: &str = "json";

/// Store backed by a directory of JSON documents.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: Arc<PathBuf>,
    // Serializes read-modify-write cycles within this process.
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            operation: "create directory",
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            root: Arc::new(root),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &AnalysisId) -> PathBuf {
        self.root.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T> + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || task(&root)).await?
    }
}

#[async_trait]
impl AnalysisStore for JsonFileStore {
    async fn create_analysis(&self, analysis: NewAnalysis) -> Result<AnalysisId> {
        ensure_finite(&analysis)?;
        let id = AnalysisId::generate();
        let record = AnalysisRecord::from_new(id.clone(), analysis, Utc::now());
        let path = self.record_path(&id);
        let _guard = self.write_lock.lock().await;
        self.blocking(move |_| write_record(&path, &record)).await?;
        tracing::debug!(analysis_id = %id, "created analysis on disk");
        Ok(id)
    }

    async fn get_analysis(&self, dataset_id: &DatasetId) -> Result<Option<AnalysisRecord>> {
        let dataset_id = dataset_id.clone();
        self.blocking(move |root| {
            let records = read_all(root)?;
            let matching = records
                .iter()
                .filter(|record| record.dataset_id == dataset_id);
            Ok(latest(matching).cloned())
        })
        .await
    }

    async fn get_analysis_by_id(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>> {
        let path = self.record_path(id);
        self.blocking(move |_| read_record_if_exists(&path)).await
    }

    async fn update_insights(
        &self,
        id: &AnalysisId,
        insights: Vec<String>,
        status: InsightStatus,
    ) -> Result<()> {
        let path = self.record_path(id);
        let id = id.to_string();
        let _guard = self.write_lock.lock().await;
        self.blocking(move |_| {
            let mut record =
                read_record_if_exists(&path)?.ok_or(StoreError::NotFound { id })?;
            record.replace_insights(insights, status, Utc::now());
            write_record(&path, &record)
        })
        .await
    }
}

fn read_record_if_exists(path: &Path) -> Result<Option<AnalysisRecord>> {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Serialization {
                path: path.to_path_buf(),
                source,
            }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_all(root: &Path) -> Result<Vec<AnalysisRecord>> {
    let entries = fs::read_dir(root).map_err(|source| StoreError::Io {
        operation: "list",
        path: root.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            operation: "list",
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
            continue;
        }
        match read_record_if_exists(&path) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(err @ StoreError::Serialization { .. }) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable analysis record");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(records)
}

fn write_record(path: &Path, record: &AnalysisRecord) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(record).map_err(|source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|source| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(&bytes).map_err(|source| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source,
    })?;
    file.sync_all().map_err(|source| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_model::{Statistics, UserId};
    use tempfile::tempdir;

    fn new_analysis() -> NewAnalysis {
        NewAnalysis {
            dataset_id: DatasetId::new("ds").unwrap(),
            user_id: UserId::new("user").unwrap(),
            dataset_name: None,
            profile: None,
            statistics: Statistics::default(),
            correlations: None,
            ai_insights: None,
        }
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let id = store.create_analysis(new_analysis()).await.unwrap();
        store
            .update_insights(&id, vec!["x".to_string()], InsightStatus::Fallback)
            .await
            .unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![format!("{id}.json")]);
    }

    #[tokio::test]
    async fn corrupted_documents_are_skipped_when_listing() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let id = store.create_analysis(new_analysis()).await.unwrap();
        fs::write(dir.path().join("broken.json"), b"{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let found = store
            .get_analysis(&DatasetId::new("ds").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);
    }
}
