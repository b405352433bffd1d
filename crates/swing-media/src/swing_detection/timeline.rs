//! Motion timeline construction.
//!
//! Samples the video at a fixed interval and scores each frame against the
//! previously sampled one. Only the previous frame's luminance is retained,
//! so memory stays at two frames regardless of video length.

use image::GrayImage;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::config::SwingDetectionConfig;
use super::scorer::luma_difference;
use crate::error::MediaResult;
use crate::probe::VideoInfo;
use crate::sampler::FrameSampler;

/// One point of the motion signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Seconds from the start of the video
    pub timestamp: f64,
    /// Dissimilarity to the previous sampled frame (>= 0)
    pub motion_score: f64,
}

/// Ordered motion samples for a whole video.
///
/// Timestamps are strictly increasing; gaps appear where sampling failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionTimeline {
    samples: Vec<MotionSample>,
    requested: usize,
}

impl MotionTimeline {
    /// Build a timeline from pre-computed samples.
    pub fn from_samples(samples: Vec<MotionSample>) -> Self {
        let requested = samples.len();
        Self { samples, requested }
    }

    /// Build a timeline from scores at a uniform interval starting at 0.
    pub fn from_scores(scores: &[f64], interval: f64) -> Self {
        Self::from_samples(
            scores
                .iter()
                .enumerate()
                .map(|(i, &motion_score)| MotionSample {
                    timestamp: i as f64 * interval,
                    motion_score,
                })
                .collect(),
        )
    }

    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of timestamps the builder asked the sampler for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Number of timestamps the sampler failed to produce.
    pub fn gaps(&self) -> usize {
        self.requested.saturating_sub(self.samples.len())
    }

    /// Mean motion score, or `None` for an empty timeline.
    pub fn mean_score(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.motion_score).sum();
        Some(sum / self.samples.len() as f64)
    }

    /// Maximum motion score, or `None` for an empty timeline.
    pub fn peak_score(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.motion_score)
            .reduce(f64::max)
    }
}

/// Sample the whole video and build its motion timeline.
///
/// Frame-local sampling failures leave gaps and the caller decides what an
/// empty timeline means. Any other error (missing ffmpeg, spawn failure)
/// would fail every sample the same way, so it aborts the timeline.
pub async fn build_motion_timeline(
    sampler: &dyn FrameSampler,
    video: &Path,
    info: &VideoInfo,
    config: &SwingDetectionConfig,
) -> MediaResult<MotionTimeline> {
    let requested = config.sample_count(info.duration);
    let mut samples = Vec::with_capacity(requested);
    let mut previous: Option<GrayImage> = None;

    debug!(
        path = %video.display(),
        samples = requested,
        interval = config.sample_interval,
        "Extracting motion samples"
    );

    for i in 0..requested {
        let timestamp = i as f64 * config.sample_interval;

        let frame = match sampler.sample(video, timestamp).await {
            Ok(frame) => frame.to_luma8(),
            Err(e) if e.is_frame_local() => {
                counter!("swing_frame_sample_failures_total").increment(1);
                debug!(timestamp, error = %e, "Skipping motion sample");
                continue;
            }
            Err(e) => {
                warn!(timestamp, error = %e, "Motion sampling aborted");
                return Err(e);
            }
        };
        counter!("swing_frames_sampled_total").increment(1);

        let motion_score = previous
            .as_ref()
            .map(|prev| luma_difference(prev, &frame))
            .unwrap_or(0.0);

        samples.push(MotionSample {
            timestamp,
            motion_score,
        });

        // Drops the older frame
        previous = Some(frame);

        if i % 10 == 0 {
            debug!(progress = i, total = requested, "Motion analysis");
        }
    }

    let timeline = MotionTimeline { samples, requested };
    debug!(
        samples = timeline.len(),
        gaps = timeline.gaps(),
        "Motion timeline complete"
    );
    Ok(timeline)
}
