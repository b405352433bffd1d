//! Swing analysis orchestration.
//!
//! Takes one local video through status reporting, swing detection, phase
//! frame extraction, thumbnail encoding and storage. Every video is bounded
//! by the configured job timeout.

use metrics::counter;
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;

use swing_media::{
    encode_thumbnail, extract_phase_frames, FfmpegFrameSampler, FfprobeProber, FrameSampler,
    MediaError, SwingDetector, VideoProber,
};
use swing_models::{
    AnalysisRecord, AnalysisStatus, FrameRecord, SwingAnalysis, SwingPhase, VideoKey,
};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::AnalysisLogger;
use crate::status::StatusSink;
use crate::store::{FrameStore, JPEG_CONTENT_TYPE, JSON_CONTENT_TYPE};

/// Processes uploaded swing videos into stored phase frames.
pub struct SwingFrameProcessor {
    config: WorkerConfig,
    detector: SwingDetector,
    prober: Arc<dyn VideoProber>,
    motion_sampler: Arc<dyn FrameSampler>,
    phase_sampler: Arc<dyn FrameSampler>,
    status: Arc<dyn StatusSink>,
    store: Arc<dyn FrameStore>,
}

impl SwingFrameProcessor {
    /// Create a processor backed by ffmpeg/ffprobe.
    pub fn new(config: WorkerConfig, status: Arc<dyn StatusSink>, store: Arc<dyn FrameStore>) -> Self {
        let ffmpeg_timeout = config.ffmpeg_timeout.as_secs();
        Self {
            detector: SwingDetector::new(config.detection_config()),
            prober: Arc::new(FfprobeProber),
            motion_sampler: Arc::new(FfmpegFrameSampler::for_motion().with_timeout(ffmpeg_timeout)),
            phase_sampler: Arc::new(FfmpegFrameSampler::for_phases().with_timeout(ffmpeg_timeout)),
            config,
            status,
            store,
        }
    }

    /// Replace the media collaborators.
    pub fn with_media(
        mut self,
        prober: Arc<dyn VideoProber>,
        motion_sampler: Arc<dyn FrameSampler>,
        phase_sampler: Arc<dyn FrameSampler>,
    ) -> Self {
        self.prober = prober;
        self.motion_sampler = motion_sampler;
        self.phase_sampler = phase_sampler;
        self
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Process the video at `video`, identified by its storage key.
    ///
    /// Returns the final record on success. On failure the `failed` record
    /// has already been reported.
    pub async fn process(&self, video: &Path, video_key: &str) -> WorkerResult<AnalysisRecord> {
        let key = VideoKey::parse(video_key);
        let logger = AnalysisLogger::new(&key.analysis_id, "swing_extraction");
        let span = logger.create_span();

        async {
            let mut record = AnalysisRecord::new(&key.analysis_id, &key.user_id);
            self.report(&record).await;
            logger.log_start(video_key);

            let outcome = tokio::time::timeout(
                self.config.job_timeout,
                self.run(video, &key, &mut record, &logger),
            )
            .await
            .unwrap_or_else(|_| Err(WorkerError::Timeout(self.config.job_timeout.as_secs())));

            match outcome {
                Ok(analysis) => {
                    let window = analysis.swing_detection;
                    let message = format!(
                        "Swing detection complete! Swing: {:.1}s-{:.1}s",
                        window.swing_start, window.swing_end
                    );
                    logger.log_completion(&format!(
                        "{} frames, {}",
                        analysis.frames_generated, window
                    ));
                    record.complete(analysis, message);
                    self.report(&record).await;
                    counter!("swing_analyses_total", "status" => "completed").increment(1);
                    Ok(record)
                }
                Err(e) => {
                    logger.log_error(&e.to_string());
                    record.fail(&e);
                    self.report(&record).await;
                    counter!("swing_analyses_total", "status" => "failed").increment(1);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        video: &Path,
        key: &VideoKey,
        record: &mut AnalysisRecord,
        logger: &AnalysisLogger,
    ) -> WorkerResult<SwingAnalysis> {
        tokio::fs::metadata(video).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                WorkerError::Media(MediaError::FileNotFound(video.to_path_buf()))
            }
            _ => WorkerError::Io(e),
        })?;

        record.set_status(AnalysisStatus::Processing, "Smart motion detection starting...");
        self.report(record).await;

        let detection = self
            .detector
            .detect(video, self.prober.as_ref(), self.motion_sampler.as_ref())
            .await?;
        logger.log_progress(&format!(
            "Swing {} from {} samples, {} events",
            detection.window, detection.sample_count, detection.event_count
        ));

        record.set_status(AnalysisStatus::Uploading, "Uploading swing frames...");
        self.report(record).await;

        let frames = extract_phase_frames(self.phase_sampler.as_ref(), video, &detection.window).await;
        if frames.len() < SwingPhase::ALL.len() {
            logger.log_warning(&format!(
                "Only {} of {} phase frames extracted",
                frames.len(),
                SwingPhase::ALL.len()
            ));
        }

        let spec = self.config.thumbnail_spec();
        let mut stored = Vec::with_capacity(frames.len());

        for (index, frame) in frames.iter().enumerate() {
            let bytes = encode_thumbnail(&frame.raster, spec)?;
            let frame_key = key.frame_key(index, frame.phase);
            self.store.put(&frame_key, bytes, JPEG_CONTENT_TYPE).await?;

            stored.push(FrameRecord {
                frame_number: index,
                timestamp: frame.timestamp,
                phase: frame.phase,
                key: frame_key,
                swing_percentage: frame.swing_percentage,
            });
        }

        let analysis = SwingAnalysis::new(detection.window, stored);
        self.store
            .put(
                &key.analysis_key(),
                serde_json::to_vec_pretty(&analysis)?,
                JSON_CONTENT_TYPE,
            )
            .await?;

        Ok(analysis)
    }

    /// Push a status update; failures are logged and swallowed.
    async fn report(&self, record: &AnalysisRecord) {
        if let Err(e) = self.status.update(record).await {
            tracing::warn!(
                analysis_id = %record.analysis_id,
                status = %record.status,
                error = %e,
                "Status update failed"
            );
        }
    }
}
