//! Analysis status records and result documents.
//!
//! An `AnalysisRecord` is the minimal status contract a caller persists while
//! a video moves through detection and frame extraction. Once extraction
//! finishes, the record carries a `SwingAnalysis` describing the detected
//! window and every frame that was stored.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::phase::SwingPhase;
use crate::swing::SwingWindow;

/// Processing method recorded on every analysis document.
pub const PROCESSING_METHOD: &str = "smart_motion_detection";

/// Lifecycle status of a swing analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Record created, nothing processed yet
    #[default]
    Started,
    /// Motion analysis and swing detection running
    Processing,
    /// Phase frames are being encoded and stored
    Uploading,
    /// Frames stored and analysis document attached
    Completed,
    /// Processing aborted with an error
    Failed,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Started => "started",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Uploading => "uploading",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Completed | AnalysisStatus::Failed)
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "started" => Ok(AnalysisStatus::Started),
            "processing" => Ok(AnalysisStatus::Processing),
            "uploading" => Ok(AnalysisStatus::Uploading),
            "completed" => Ok(AnalysisStatus::Completed),
            "failed" => Ok(AnalysisStatus::Failed),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// One stored phase frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameRecord {
    /// Index within the stored frame list (gap-free)
    pub frame_number: usize,
    /// Timestamp of the frame in the source video (seconds)
    pub timestamp: f64,
    /// Swing phase this frame represents
    pub phase: SwingPhase,
    /// Storage key the encoded frame was written to
    pub key: String,
    /// Fraction of the swing window (0.0-1.0)
    pub swing_percentage: f64,
}

/// Result document for a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwingAnalysis {
    /// The detected swing window
    pub swing_detection: SwingWindow,
    /// Stored frames in phase order
    pub frames: Vec<FrameRecord>,
    /// Number of frames stored
    pub frames_generated: usize,
    /// Always [`PROCESSING_METHOD`]
    pub processing_method: String,
    /// When extraction finished
    pub extraction_timestamp: DateTime<Utc>,
}

impl SwingAnalysis {
    /// Build the document for a window and its stored frames.
    pub fn new(swing_detection: SwingWindow, frames: Vec<FrameRecord>) -> Self {
        Self {
            swing_detection,
            frames_generated: frames.len(),
            frames,
            processing_method: PROCESSING_METHOD.to_string(),
            extraction_timestamp: Utc::now(),
        }
    }

    /// Phases that have no stored frame.
    pub fn missing_phases(&self) -> Vec<SwingPhase> {
        SwingPhase::ALL
            .iter()
            .copied()
            .filter(|phase| !self.frames.iter().any(|f| f.phase == *phase))
            .collect()
    }
}

/// Status record for a single analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRecord {
    /// Unique analysis identifier
    pub analysis_id: String,
    /// User who uploaded the video
    pub user_id: String,
    /// Current status
    pub status: AnalysisStatus,
    /// Human-readable progress message
    pub progress_message: String,
    /// Set when the record enters `started`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Bumped on every transition
    pub updated_at: DateTime<Utc>,
    /// Attached once the analysis completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_results: Option<SwingAnalysis>,
}

impl AnalysisRecord {
    /// Create a new record in the `started` state.
    pub fn new(analysis_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            analysis_id: analysis_id.into(),
            user_id: user_id.into(),
            status: AnalysisStatus::Started,
            progress_message: "Analysis started".to_string(),
            created_at: Some(now),
            updated_at: now,
            analysis_results: None,
        }
    }

    /// Check if the record is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to `status` with a progress message.
    pub fn set_status(&mut self, status: AnalysisStatus, message: impl Into<String>) {
        self.status = status;
        self.progress_message = message.into();
        self.updated_at = Utc::now();
        if status == AnalysisStatus::Started && self.created_at.is_none() {
            self.created_at = Some(self.updated_at);
        }
    }

    /// Mark the analysis as completed and attach its results.
    pub fn complete(&mut self, results: SwingAnalysis, message: impl Into<String>) {
        self.set_status(AnalysisStatus::Completed, message);
        self.analysis_results = Some(results);
    }

    /// Mark the analysis as failed.
    pub fn fail(&mut self, error: impl fmt::Display) {
        self.set_status(AnalysisStatus::Failed, format!("Swing detection failed: {}", error));
    }
}
