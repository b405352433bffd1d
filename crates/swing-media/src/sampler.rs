//! Single-frame sampling.
//!
//! The detector only needs one decoded frame at a time, so the sampler
//! contract is a single `(video, timestamp) -> raster` request. The FFmpeg
//! implementation seeks, grabs one frame as MJPEG on stdout and decodes it
//! with the `image` crate.

use async_trait::async_trait;
use image::DynamicImage;
use std::path::Path;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Frame size used for motion analysis.
pub const MOTION_FRAME_SIZE: (u32, u32) = (320, 240);

/// JPEG quality scale for motion frames (coarse, fast).
pub const MOTION_JPEG_QUALITY: u8 = 10;

/// JPEG quality scale for phase frames (near-lossless).
pub const PHASE_JPEG_QUALITY: u8 = 2;

/// Produces a decoded frame for a timestamp.
///
/// Out-of-range timestamps must fail with an error rather than panic.
#[async_trait]
pub trait FrameSampler: Send + Sync {
    async fn sample(&self, video: &Path, timestamp: f64) -> MediaResult<DynamicImage>;
}

/// Frame sampler backed by the `ffmpeg` CLI.
#[derive(Debug, Clone)]
pub struct FfmpegFrameSampler {
    /// Output frame size; `None` keeps the native resolution
    frame_size: Option<(u32, u32)>,
    /// FFmpeg `-q:v` scale
    quality: u8,
    runner: FfmpegRunner,
}

impl FfmpegFrameSampler {
    /// Small, low-quality frames for motion scoring.
    pub fn for_motion() -> Self {
        Self {
            frame_size: Some(MOTION_FRAME_SIZE),
            quality: MOTION_JPEG_QUALITY,
            runner: FfmpegRunner::new(),
        }
    }

    /// Native-resolution, high-quality frames for phase extraction.
    pub fn for_phases() -> Self {
        Self {
            frame_size: None,
            quality: PHASE_JPEG_QUALITY,
            runner: FfmpegRunner::new(),
        }
    }

    /// Bound each ffmpeg invocation.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.runner = self.runner.with_timeout(secs);
        self
    }

    /// Build the ffmpeg command for one frame.
    pub fn command(&self, video: &Path, timestamp: f64) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::to_stdout(video).seek(timestamp).single_frame();
        if let Some((width, height)) = self.frame_size {
            cmd = cmd.frame_size(width, height);
        }
        cmd.jpeg_quality(self.quality).mjpeg_pipe()
    }
}

#[async_trait]
impl FrameSampler for FfmpegFrameSampler {
    async fn sample(&self, video: &Path, timestamp: f64) -> MediaResult<DynamicImage> {
        if !timestamp.is_finite() || timestamp < 0.0 {
            return Err(MediaError::frame_unavailable(timestamp));
        }

        let bytes = self.runner.capture(&self.command(video, timestamp)).await?;

        // ffmpeg exits cleanly with no output when seeking past the end
        if bytes.is_empty() {
            debug!(timestamp, "FFmpeg produced no frame");
            return Err(MediaError::frame_unavailable(timestamp));
        }

        Ok(image::load_from_memory(&bytes)?)
    }
}
