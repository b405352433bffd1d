//! Golf swing window detection and phase frame extraction.
//!
//! Finds the interval of a video that contains the golf swing using a
//! frame-difference motion signal, then pulls one frame per swing phase.
//!
//! # Architecture
//!
//! ```text
//! Video Input
//!     │
//!     ▼
//! ┌──────────────────┐
//! │ Timeline Builder │ ← Sample every 0.1s, score against previous frame
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │    Segmenter     │ ← Hysteresis thresholds → motion events
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │    Classifier    │ ← Swing-likelihood score → SwingWindow
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ Phase Extractor  │ ← 9 frames at fixed swing fractions
//! └──────────────────┘
//! ```
//!
//! Data flows strictly forward. Frames are requested one at a time and at
//! most two are held in memory while building the timeline.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swing_media::swing_detection::{extract_phase_frames, SwingDetector};
//! use swing_media::{FfmpegFrameSampler, FfprobeProber};
//!
//! let detector = SwingDetector::default();
//! let detection = detector
//!     .detect(&path, &FfprobeProber, &FfmpegFrameSampler::for_motion())
//!     .await?;
//!
//! let frames =
//!     extract_phase_frames(&FfmpegFrameSampler::for_phases(), &path, &detection.window).await;
//! ```

mod classifier;
mod config;
mod phases;
mod scorer;
mod segmenter;
mod timeline;

#[cfg(test)]
mod tests;

pub use classifier::{classify, score_swing_probability, SwingScore};
pub use config::{ScoreWeights, SwingDetectionConfig};
pub use phases::{extract_phase_frames, phase_timestamps, PhaseFrame};
pub use scorer::{frame_difference, luma_difference};
pub use segmenter::{find_motion_events, HysteresisBand, MotionEvent};
pub use timeline::{build_motion_timeline, MotionSample, MotionTimeline};

use std::path::Path;
use swing_models::SwingWindow;
use tracing::info;

use crate::error::{MediaError, MediaResult};
use crate::probe::{probe_or_default, VideoInfo, VideoProber};
use crate::sampler::FrameSampler;

/// Outcome of swing window detection for one video.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingDetection {
    pub video_info: VideoInfo,
    pub window: SwingWindow,
    /// Number of motion events the segmenter produced
    pub event_count: usize,
    /// Number of motion samples in the timeline
    pub sample_count: usize,
}

/// Runs probe → timeline → segmenter → classifier for a video.
#[derive(Debug, Clone, Default)]
pub struct SwingDetector {
    config: SwingDetectionConfig,
}

impl SwingDetector {
    pub fn new(config: SwingDetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SwingDetectionConfig {
        &self.config
    }

    /// Detect the swing window in `video`.
    ///
    /// Fails when sampling hits a non-frame-local error, or when frames were
    /// requested and none could be sampled.
    pub async fn detect(
        &self,
        video: &Path,
        prober: &dyn VideoProber,
        sampler: &dyn FrameSampler,
    ) -> MediaResult<SwingDetection> {
        let video_info = probe_or_default(prober, video).await;

        let timeline = build_motion_timeline(sampler, video, &video_info, &self.config).await?;
        if timeline.is_empty() && timeline.requested() > 0 {
            return Err(MediaError::NoFramesExtracted {
                requested: timeline.requested(),
            });
        }

        let events = find_motion_events(&timeline, &self.config);
        let window = classify(&events, video_info.duration, &self.config);

        info!(
            path = %video.display(),
            samples = timeline.len(),
            events = events.len(),
            window = %window,
            "Swing detection complete"
        );

        Ok(SwingDetection {
            video_info,
            window,
            event_count: events.len(),
            sample_count: timeline.len(),
        })
    }
}
