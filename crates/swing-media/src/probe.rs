//! FFprobe video information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::command::check_ffprobe;
use crate::error::{MediaError, MediaResult};

/// Frame rate assumed when the stream does not report a usable one.
pub const DEFAULT_FPS: f64 = 30.0;

/// Duration assumed when probing fails entirely.
pub const DEFAULT_DURATION: f64 = 30.0;

/// Video file information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Frame rate (fps)
    pub fps: f64,
    /// Approximate number of frames (`duration * fps`, truncated)
    pub total_frames: u64,
}

impl VideoInfo {
    pub fn new(duration: f64, fps: f64) -> Self {
        Self {
            duration,
            fps,
            total_frames: (duration * fps).max(0.0) as u64,
        }
    }
}

impl Default for VideoInfo {
    /// Metadata substituted when a video cannot be probed.
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, DEFAULT_FPS)
    }
}

/// Source of video metadata.
#[async_trait]
pub trait VideoProber: Send + Sync {
    async fn probe(&self, video: &Path) -> MediaResult<VideoInfo>;
}

/// Prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProber;

#[async_trait]
impl VideoProber for FfprobeProber {
    async fn probe(&self, video: &Path) -> MediaResult<VideoInfo> {
        probe_video(video).await
    }
}

/// Probe a video, substituting [`VideoInfo::default`] on any failure.
///
/// Detection never halts because metadata is unavailable.
pub async fn probe_or_default(prober: &dyn VideoProber, video: &Path) -> VideoInfo {
    match prober.probe(video).await {
        Ok(info) => {
            debug!(
                duration = info.duration,
                fps = info.fps,
                total_frames = info.total_frames,
                "Probed video"
            );
            info
        }
        Err(e) => {
            let fallback = VideoInfo::default();
            warn!(
                path = %video.display(),
                error = %e,
                duration = fallback.duration,
                fps = fallback.fps,
                "Video probe failed, using default metadata"
            );
            fallback
        }
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// Probe a video file for information.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    check_ffprobe()?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: "FFprobe failed".to_string(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    parse_probe_output(&output.stdout)
}

/// Parse ffprobe's JSON output into [`VideoInfo`].
fn parse_probe_output(json: &[u8]) -> MediaResult<VideoInfo> {
    let probe: FfprobeOutput = serde_json::from_slice(json)?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::InvalidVideo("No video stream found".to_string()))?;

    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| MediaError::InvalidVideo("Missing or invalid duration".to_string()))?;

    // r_frame_rate first: avg_frame_rate is 0/0 for some variable-rate phone videos
    let fps = video_stream
        .r_frame_rate
        .as_ref()
        .or(video_stream.avg_frame_rate.as_ref())
        .and_then(|r| parse_frame_rate(r))
        .unwrap_or(DEFAULT_FPS);

    Ok(VideoInfo::new(duration, fps))
}

/// Parse frame rate string (e.g., "30/1" or "29.97").
fn parse_frame_rate(s: &str) -> Option<f64> {
    let fps = if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den <= 0.0 {
            return None;
        }
        num / den
    } else {
        s.parse().ok()?
    };

    (fps.is_finite() && fps > 0.0).then_some(fps)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProber;

    #[async_trait]
    impl VideoProber for FailingProber {
        async fn probe(&self, _video: &Path) -> MediaResult<VideoInfo> {
            Err(MediaError::FfprobeNotFound)
        }
    }

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
        assert!(parse_frame_rate("0/0").is_none());
        assert!(parse_frame_rate("abc").is_none());
    }

    #[test]
    fn test_default_video_info() {
        let info = VideoInfo::default();
        assert_eq!(info.duration, 30.0);
        assert_eq!(info.fps, 30.0);
        assert_eq!(info.total_frames, 900);
    }

    #[test]
    fn test_parse_probe_output() {
        let json = br#"{
            "format": {"duration": "4.500000"},
            "streams": [
                {"codec_type": "audio"},
                {"codec_type": "video", "r_frame_rate": "60/1", "avg_frame_rate": "0/0"}
            ]
        }"#;
        let info = parse_probe_output(json).unwrap();
        assert!((info.duration - 4.5).abs() < 1e-9);
        assert!((info.fps - 60.0).abs() < 1e-9);
        assert_eq!(info.total_frames, 270);
    }

    #[test]
    fn test_parse_probe_output_bad_fps_uses_default() {
        let json = br#"{
            "format": {"duration": "2.0"},
            "streams": [{"codec_type": "video", "r_frame_rate": "0/0"}]
        }"#;
        let info = parse_probe_output(json).unwrap();
        assert_eq!(info.fps, DEFAULT_FPS);
    }

    #[test]
    fn test_parse_probe_output_requires_video_and_duration() {
        let no_video = br#"{"format": {"duration": "2.0"}, "streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            parse_probe_output(no_video),
            Err(MediaError::InvalidVideo(_))
        ));

        let no_duration = br#"{"format": {}, "streams": [{"codec_type": "video"}]}"#;
        assert!(matches!(
            parse_probe_output(no_duration),
            Err(MediaError::InvalidVideo(_))
        ));
    }

    #[tokio::test]
    async fn test_probe_or_default_substitutes() {
        let info = probe_or_default(&FailingProber, Path::new("missing.mov")).await;
        assert_eq!(info, VideoInfo::default());
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let result = probe_video("/definitely/not/here.mov").await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
