//! Configuration for swing window detection.
//!
//! These parameters control motion sampling, hysteresis segmentation and the
//! swing-likelihood heuristics. The defaults are tuned for phone recordings
//! of a single golfer shot from a tripod.

use serde::{Deserialize, Serialize};

/// Configuration for the swing window detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingDetectionConfig {
    /// Seconds between motion samples.
    ///
    /// Fixed rather than derived from the video's frame rate so every video
    /// yields a timeline of the same resolution.
    pub sample_interval: f64,

    /// Position of the enter threshold between mean and peak motion.
    ///
    /// `enter = avg + (peak - avg) * enter_ratio`
    pub enter_ratio: f64,

    /// Exit threshold as a fraction of the enter threshold.
    ///
    /// Must be below 1.0 to give the hysteresis band its width.
    pub exit_ratio: f64,

    /// Minimum composite score for an event to be a swing candidate.
    pub candidate_threshold: f64,

    /// Duration band (seconds) scored at the maximum.
    pub ideal_duration: (f64, f64),

    /// Events shorter than this score zero on duration.
    pub min_duration: f64,

    /// Events longer than this score zero on duration.
    pub max_duration: f64,

    /// Peak motion at or below this scores zero on intensity.
    pub intensity_floor: f64,

    /// Peak motion at which intensity saturates.
    pub intensity_full_scale: f64,

    /// Events with fewer samples get `short_event_progression`.
    pub min_progression_samples: usize,

    /// Progression sub-score for events too short to assess build-up.
    pub short_event_progression: f64,

    /// A sample counts as sustained above `peak * sustain_ratio`.
    pub sustain_ratio: f64,

    /// Sub-score weights: duration, intensity, progression, sustain.
    pub weights: ScoreWeights,

    /// Fallback window as fractions of the video duration.
    pub fallback_window: (f64, f64),

    /// Confidence reported for the longest-event fallback.
    pub fallback_longest_confidence: f64,

    /// Confidence reported for the timing fallback.
    pub fallback_timing_confidence: f64,
}

/// Weights applied to the four swing sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub duration: f64,
    pub intensity: f64,
    pub progression: f64,
    pub sustain: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            duration: 0.3,
            intensity: 0.3,
            progression: 0.2,
            sustain: 0.2,
        }
    }
}

impl Default for SwingDetectionConfig {
    fn default() -> Self {
        Self {
            sample_interval: 0.1,
            enter_ratio: 0.3,
            exit_ratio: 0.4,
            candidate_threshold: 0.3,
            ideal_duration: (2.0, 4.0),
            min_duration: 1.0,
            max_duration: 6.0,
            intensity_floor: 0.1,
            intensity_full_scale: 0.2,
            min_progression_samples: 6,
            short_event_progression: 0.3,
            sustain_ratio: 0.6,
            weights: ScoreWeights::default(),
            fallback_window: (0.35, 0.65),
            fallback_longest_confidence: 0.5,
            fallback_timing_confidence: 0.3,
        }
    }
}

impl SwingDetectionConfig {
    /// Finer sampling for short clips or slow-motion recordings.
    pub fn fine() -> Self {
        Self {
            sample_interval: 0.05,
            ..Self::default()
        }
    }

    /// Coarser sampling for long sessions where throughput matters more.
    pub fn coarse() -> Self {
        Self {
            sample_interval: 0.2,
            ..Self::default()
        }
    }

    /// Builder-style setter for the sampling interval.
    ///
    /// Non-positive or non-finite values are ignored.
    pub fn with_sample_interval(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            self.sample_interval = seconds;
        }
        self
    }

    /// Builder-style setter for the hysteresis ratios.
    pub fn with_hysteresis(mut self, enter_ratio: f64, exit_ratio: f64) -> Self {
        self.enter_ratio = enter_ratio.clamp(0.0, 1.0);
        self.exit_ratio = exit_ratio.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the candidacy threshold.
    pub fn with_candidate_threshold(mut self, threshold: f64) -> Self {
        self.candidate_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Number of sample requests for a video of `duration` seconds.
    pub fn sample_count(&self, duration: f64) -> usize {
        if !duration.is_finite() || duration <= 0.0 {
            return 0;
        }
        (duration / self.sample_interval).floor() as usize
    }
}
