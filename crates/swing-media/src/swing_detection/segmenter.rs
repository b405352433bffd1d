//! Hysteresis segmentation of the motion timeline into events.
//!
//! # State Machine
//!
//! ```text
//!                      score > enter
//!     ┌──────────────────────────────────────────────┐
//!     │                                              ▼
//! ┌────────┐                                   ┌──────────┐
//! │ Still  │◄──────────────────────────────────│ InMotion │
//! └────────┘        score < exit (emit)        └──────────┘
//! ```
//!
//! `enter = avg + (peak - avg) * enter_ratio` and `exit = enter * exit_ratio`.
//! The gap between the two thresholds keeps a noisy signal hovering around
//! one level from opening and closing events on every sample.
//!
//! An event still open when the timeline ends is not emitted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::SwingDetectionConfig;
use super::timeline::{MotionSample, MotionTimeline};

/// A contiguous span of elevated motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// Timestamp of the sample that opened the event
    pub start: f64,
    /// Timestamp of the sample that closed the event
    pub end: f64,
    /// `end - start`
    pub duration: f64,
    /// Maximum score within the event
    pub peak_motion: f64,
    /// Mean score within the event
    pub avg_motion: f64,
    /// Scores from the opening sample up to (excluding) the closing sample
    pub motion_scores: Vec<f64>,
}

impl MotionEvent {
    /// Build an event from the samples it covers and the closing timestamp.
    ///
    /// Returns `None` for an empty span or a non-positive duration.
    fn from_span(span: &[MotionSample], end: f64) -> Option<Self> {
        let start = span.first()?.timestamp;
        if end <= start {
            return None;
        }

        let motion_scores: Vec<f64> = span.iter().map(|s| s.motion_score).collect();
        let peak_motion = motion_scores.iter().copied().fold(f64::MIN, f64::max);
        let avg_motion = motion_scores.iter().sum::<f64>() / motion_scores.len() as f64;

        Some(Self {
            start,
            end,
            duration: end - start,
            peak_motion,
            avg_motion,
            motion_scores,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.motion_scores.len()
    }
}

/// Enter/exit thresholds derived from a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisBand {
    pub enter: f64,
    pub exit: f64,
}

impl HysteresisBand {
    /// Compute the band for a timeline, or `None` if it is empty.
    pub fn for_timeline(timeline: &MotionTimeline, config: &SwingDetectionConfig) -> Option<Self> {
        let avg = timeline.mean_score()?;
        let peak = timeline.peak_score()?;
        let enter = avg + (peak - avg) * config.enter_ratio;
        Some(Self {
            enter,
            exit: enter * config.exit_ratio,
        })
    }
}

enum State {
    Still,
    InMotion { start_idx: usize },
}

/// Split the timeline into disjoint motion events ordered by start.
pub fn find_motion_events(
    timeline: &MotionTimeline,
    config: &SwingDetectionConfig,
) -> Vec<MotionEvent> {
    let band = match HysteresisBand::for_timeline(timeline, config) {
        Some(band) => band,
        None => return Vec::new(),
    };

    debug!(
        enter = format!("{:.4}", band.enter),
        exit = format!("{:.4}", band.exit),
        "Motion thresholds"
    );

    let samples = timeline.samples();
    let mut events = Vec::new();
    let mut state = State::Still;

    for (i, sample) in samples.iter().enumerate() {
        let score = sample.motion_score;

        match state {
            State::Still if score > band.enter => {
                state = State::InMotion { start_idx: i };
            }
            State::InMotion { start_idx } if score < band.exit => {
                if let Some(event) = MotionEvent::from_span(&samples[start_idx..i], sample.timestamp) {
                    events.push(event);
                }
                state = State::Still;
            }
            _ => {}
        }
    }

    if let State::InMotion { start_idx } = state {
        debug!(
            start = samples[start_idx].timestamp,
            "Motion still elevated at end of timeline, event dropped"
        );
    }

    events
}
