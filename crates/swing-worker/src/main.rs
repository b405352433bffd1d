//! Golf swing worker binary.
//!
//! Usage: `swing-worker <video-path> [video-key]`

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swing_worker::{JsonFileStatusSink, LocalFrameStore, SwingFrameProcessor, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("swing_worker=info,swing_media=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let mut args = std::env::args().skip(1);
    let Some(video) = args.next().map(PathBuf::from) else {
        eprintln!("usage: swing-worker <video-path> [video-key]");
        std::process::exit(2);
    };
    // Without a storage key the file name stands in; user and id are then derived
    let video_key = args.next().unwrap_or_else(|| {
        video
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    info!("Starting swing-worker");

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    if let Err(e) = tokio::fs::create_dir_all(&config.output_dir).await {
        error!("Failed to create output directory {}: {}", config.output_dir, e);
        std::process::exit(1);
    }

    let status = Arc::new(JsonFileStatusSink::new(&config.output_dir));
    let store = Arc::new(LocalFrameStore::new(&config.output_dir));
    let processor = SwingFrameProcessor::new(config, status, store);

    match processor.process(&video, &video_key).await {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize analysis record: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!(retryable = e.is_retryable(), "Analysis failed: {}", e);
            std::process::exit(1);
        }
    }

    info!("Worker finished");
}
