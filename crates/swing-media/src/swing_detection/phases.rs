//! Phase frame extraction.
//!
//! Requests one frame per swing phase at fixed fractions of the window.

use image::DynamicImage;
use std::path::Path;
use swing_models::{SwingPhase, SwingWindow};
use tracing::{debug, warn};

use crate::sampler::FrameSampler;

/// A decoded frame at one phase of the swing.
#[derive(Debug, Clone)]
pub struct PhaseFrame {
    pub phase: SwingPhase,
    /// Fraction of the swing window (0.0-1.0)
    pub swing_percentage: f64,
    /// Seconds from the start of the video
    pub timestamp: f64,
    pub raster: DynamicImage,
}

/// Timestamps for every phase of `window`, in swing order.
pub fn phase_timestamps(window: &SwingWindow) -> [(SwingPhase, f64); 9] {
    SwingPhase::ALL.map(|phase| (phase, window.timestamp_at(phase.fraction())))
}

/// Extract up to nine phase frames from `video`.
///
/// A phase whose frame cannot be sampled is logged and left out.
pub async fn extract_phase_frames(
    sampler: &dyn FrameSampler,
    video: &Path,
    window: &SwingWindow,
) -> Vec<PhaseFrame> {
    let mut frames = Vec::with_capacity(SwingPhase::ALL.len());

    for (phase, timestamp) in phase_timestamps(window) {
        match sampler.sample(video, timestamp).await {
            Ok(raster) => {
                debug!(phase = %phase, timestamp, "Extracted phase frame");
                frames.push(PhaseFrame {
                    phase,
                    swing_percentage: phase.fraction(),
                    timestamp,
                    raster,
                });
            }
            Err(e) => {
                warn!(phase = %phase, timestamp, error = %e, "Failed to extract phase frame");
            }
        }
    }

    frames
}
