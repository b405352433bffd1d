//! Analysis status reporting.
//!
//! The processor pushes the full [`AnalysisRecord`] on every transition.
//! Sinks decide where it goes; failures to report never abort an analysis.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use swing_models::AnalysisRecord;
use tracing::info;

use crate::error::{WorkerError, WorkerResult};

/// Receives analysis status updates.
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn update(&self, record: &AnalysisRecord) -> WorkerResult<()>;
}

/// Sink that only logs each transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingStatusSink;

#[async_trait]
impl StatusSink for LoggingStatusSink {
    async fn update(&self, record: &AnalysisRecord) -> WorkerResult<()> {
        info!(
            analysis_id = %record.analysis_id,
            user_id = %record.user_id,
            status = %record.status,
            "Progress: {}", record.progress_message
        );
        Ok(())
    }
}

/// Sink that keeps the latest record as `analyses/{id}/status.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStatusSink {
    root: PathBuf,
}

impl JsonFileStatusSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the status document for an analysis.
    pub fn status_path(&self, analysis_id: &str) -> PathBuf {
        self.root
            .join("analyses")
            .join(analysis_id)
            .join("status.json")
    }
}

#[async_trait]
impl StatusSink for JsonFileStatusSink {
    async fn update(&self, record: &AnalysisRecord) -> WorkerResult<()> {
        let path = self.status_path(&record.analysis_id);
        let body = serde_json::to_vec_pretty(record)?;
        write_replacing(&path, &body)
            .await
            .map_err(|e| WorkerError::status_failed(format!("{}: {}", path.display(), e)))?;

        LoggingStatusSink.update(record).await
    }
}

/// Write via a temporary sibling and rename so readers never see a partial file.
async fn write_replacing(path: &Path, body: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body).await?;
    tokio::fs::rename(&tmp, path).await
}
