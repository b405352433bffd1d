//! Shared data models for golf swing phase-frame extraction.
//!
//! This crate provides Serde-serializable types for:
//! - The detected swing window and how it was chosen
//! - The fixed table of swing phases (P1-P9)
//! - Analysis status records and result documents
//! - Storage key conventions for uploaded videos and extracted frames

pub mod analysis;
pub mod error;
pub mod phase;
pub mod swing;
pub mod video_key;

// Re-export common types
pub use analysis::{AnalysisRecord, AnalysisStatus, FrameRecord, SwingAnalysis, PROCESSING_METHOD};
pub use error::{ModelError, ModelResult};
pub use phase::SwingPhase;
pub use swing::{DetectionMethod, SwingWindow};
pub use video_key::{analysis_key, frame_key, VideoKey, UNKNOWN_USER};
