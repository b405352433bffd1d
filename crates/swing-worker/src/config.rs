//! Worker configuration.

use std::str::FromStr;
use std::time::Duration;

use swing_media::{SwingDetectionConfig, ThumbnailSpec};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Root directory extracted frames and analysis documents are written to
    pub output_dir: String,
    /// Wall-clock limit for one video
    pub job_timeout: Duration,
    /// Limit for a single ffmpeg invocation
    pub ffmpeg_timeout: Duration,
    /// Seconds between motion samples
    pub sample_interval: f64,
    /// Maximum stored frame width
    pub thumbnail_max_width: u32,
    /// Maximum stored frame height
    pub thumbnail_max_height: u32,
    /// JPEG quality of stored frames (1-100)
    pub jpeg_quality: u8,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        let thumbnail = ThumbnailSpec::default();
        Self {
            output_dir: "./swing-output".to_string(),
            job_timeout: Duration::from_secs(300), // 5 minutes
            ffmpeg_timeout: Duration::from_secs(30),
            sample_interval: SwingDetectionConfig::default().sample_interval,
            thumbnail_max_width: thumbnail.max_width,
            thumbnail_max_height: thumbnail.max_height,
            jpeg_quality: thumbnail.quality,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            output_dir: std::env::var("SWING_OUTPUT_DIR").unwrap_or(defaults.output_dir),
            job_timeout: Duration::from_secs(env_or(
                "SWING_JOB_TIMEOUT_SECS",
                defaults.job_timeout.as_secs(),
            )),
            ffmpeg_timeout: Duration::from_secs(env_or(
                "SWING_FFMPEG_TIMEOUT_SECS",
                defaults.ffmpeg_timeout.as_secs(),
            )),
            sample_interval: env_or("SWING_SAMPLE_INTERVAL", defaults.sample_interval),
            thumbnail_max_width: env_or("SWING_THUMBNAIL_MAX_WIDTH", defaults.thumbnail_max_width),
            thumbnail_max_height: env_or(
                "SWING_THUMBNAIL_MAX_HEIGHT",
                defaults.thumbnail_max_height,
            ),
            jpeg_quality: env_or("SWING_JPEG_QUALITY", defaults.jpeg_quality),
        }
    }

    /// Detection parameters derived from this config.
    pub fn detection_config(&self) -> SwingDetectionConfig {
        SwingDetectionConfig::default().with_sample_interval(self.sample_interval)
    }

    /// Thumbnail bounds and quality for stored frames.
    pub fn thumbnail_spec(&self) -> ThumbnailSpec {
        ThumbnailSpec {
            max_width: self.thumbnail_max_width,
            max_height: self.thumbnail_max_height,
            quality: self.jpeg_quality.clamp(1, 100),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
