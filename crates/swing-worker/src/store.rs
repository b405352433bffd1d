//! Frame storage.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::{WorkerError, WorkerResult};

/// Content type of stored phase frames.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Content type of stored analysis documents.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Destination for encoded frames and analysis documents.
#[async_trait]
pub trait FrameStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> WorkerResult<()>;
}

/// Store that writes objects below a local directory.
#[derive(Debug, Clone)]
pub struct LocalFrameStore {
    root: PathBuf,
}

impl LocalFrameStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `key` below the root.
    ///
    /// Keys must be relative and may not contain `..` segments.
    pub fn path_for(&self, key: &str) -> WorkerResult<PathBuf> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(WorkerError::upload_failed(format!("invalid key: {key}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FrameStore for LocalFrameStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> WorkerResult<()> {
        let path = self.path_for(key)?;
        debug!("Storing {} bytes ({}) at {}", data.len(), content_type, path.display());

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WorkerError::upload_failed(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| WorkerError::upload_failed(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}
