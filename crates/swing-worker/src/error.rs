//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Status update failed: {0}")]
    StatusFailed(String),

    #[error("Job timed out after {0} seconds")]
    Timeout(u64),

    #[error("Media error: {0}")]
    Media(#[from] swing_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }

    pub fn status_failed(msg: impl Into<String>) -> Self {
        Self::StatusFailed(msg.into())
    }

    /// Check if error is retryable.
    ///
    /// A video with no decodable frames will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            WorkerError::UploadFailed(_)
            | WorkerError::StatusFailed(_)
            | WorkerError::Timeout(_)
            | WorkerError::Io(_) => true,
            WorkerError::Media(e) => !matches!(
                e,
                swing_media::MediaError::NoFramesExtracted { .. }
                    | swing_media::MediaError::FileNotFound(_)
                    | swing_media::MediaError::InvalidVideo(_)
            ),
            WorkerError::Json(_) => false,
        }
    }
}
