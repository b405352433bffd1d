//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),

    #[error("No frame available at {timestamp:.3}s")]
    FrameUnavailable { timestamp: f64 },

    #[error("No frames could be extracted from the video ({requested} requested)")]
    NoFramesExtracted { requested: usize },
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a frame-unavailable error.
    pub fn frame_unavailable(timestamp: f64) -> Self {
        Self::FrameUnavailable { timestamp }
    }

    /// Whether the error only affects a single frame request.
    ///
    /// Callers sampling many timestamps skip these and continue.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            MediaError::FrameUnavailable { .. }
                | MediaError::FfmpegFailed { .. }
                | MediaError::Image(_)
                | MediaError::Timeout(_)
        )
    }
}
