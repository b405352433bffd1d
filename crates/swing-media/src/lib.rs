#![deny(unreachable_patterns)]
//! FFmpeg-backed media handling for golf swing analysis.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with per-command timeouts
//! - Video probing via `ffprobe` with default metadata on failure
//! - Single-frame sampling decoded with the `image` crate
//! - Swing window detection from a frame-difference motion signal
//! - Phase frame extraction and JPEG thumbnail encoding

pub mod command;
pub mod error;
pub mod probe;
pub mod sampler;
pub mod swing_detection;
pub mod thumbnail;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_or_default, probe_video, FfprobeProber, VideoInfo, VideoProber};
pub use sampler::{FfmpegFrameSampler, FrameSampler};
pub use swing_detection::{
    extract_phase_frames, PhaseFrame, SwingDetection, SwingDetectionConfig, SwingDetector,
};
pub use thumbnail::{encode_thumbnail, ThumbnailSpec};
