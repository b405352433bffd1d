//! Golf swing phase-frame extraction worker.
//!
//! This crate provides:
//! - Environment-driven worker configuration
//! - End-to-end processing of one video into stored phase frames
//! - Status reporting through pluggable sinks
//! - Local frame storage

pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod status;
pub mod store;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::AnalysisLogger;
pub use processor::SwingFrameProcessor;
pub use status::{JsonFileStatusSink, LoggingStatusSink, StatusSink};
pub use store::{FrameStore, LocalFrameStore};
