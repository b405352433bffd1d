//! Scenario tests for swing detection.
//!
//! These run the whole pipeline against synthetic timelines and fake
//! collaborators. None of them need ffmpeg.

#[cfg(test)]
mod classifier_scenarios {
    use crate::swing_detection::{
        classify, find_motion_events, score_swing_probability, MotionTimeline,
        SwingDetectionConfig,
    };
    use swing_models::DetectionMethod;

    fn timeline(len: usize, spans: &[(usize, &[f64])]) -> MotionTimeline {
        let mut scores = vec![0.0; len];
        for (start, values) in spans {
            scores[*start..*start + values.len()].copy_from_slice(values);
        }
        MotionTimeline::from_scores(&scores, 0.1)
    }

    #[test]
    fn test_flat_timeline_falls_back_to_timing() {
        let config = SwingDetectionConfig::default();
        let flat = MotionTimeline::from_scores(&[0.02; 100], 0.1);

        let events = find_motion_events(&flat, &config);
        assert!(events.is_empty());

        let window = classify(&events, 10.0, &config);
        assert_eq!(window.method, DetectionMethod::FallbackTiming);
        assert!((window.swing_start - 3.5).abs() < 1e-9);
        assert!((window.swing_end - 6.5).abs() < 1e-9);
        assert_eq!(window.confidence, 0.3);
    }

    #[test]
    fn test_two_second_swing_is_detected() {
        // 20 samples from 1.0s: slow start, then 16 samples above 0.6 * peak
        let mut swing = vec![0.08; 4];
        swing.extend([0.12; 10]);
        swing.extend([0.15; 6]);

        let config = SwingDetectionConfig::default();
        let events = find_motion_events(&timeline(60, &[(10, &swing[..])]), &config);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert!((event.start - 1.0).abs() < 1e-9);
        assert!((event.end - 3.0).abs() < 1e-9);
        assert_eq!(event.peak_motion, 0.15);

        let score = score_swing_probability(event, &config);
        assert_eq!(score.duration, 1.0);
        assert_eq!(score.sustain, 1.0);
        assert!(score.progression > 0.5);

        let window = classify(&events, 6.0, &config);
        assert_eq!(window.method, DetectionMethod::SmartDetection);
        assert!((window.swing_start - 1.0).abs() < 1e-9);
        assert!((window.confidence - score.total).abs() < 1e-12);
    }

    #[test]
    fn test_longer_event_beats_short_spike() {
        let short = [0.18; 5];
        let mut long = vec![0.15; 20];
        long.extend([0.18; 5]);

        let config = SwingDetectionConfig::default();
        let events = find_motion_events(&timeline(100, &[(10, &short[..]), (40, &long[..])]), &config);

        assert_eq!(events.len(), 2);
        assert!((events[0].duration - 0.5).abs() < 1e-9);
        assert!((events[1].duration - 2.5).abs() < 1e-9);
        assert_eq!(score_swing_probability(&events[0], &config).duration, 0.0);

        let window = classify(&events, 10.0, &config);
        assert_eq!(window.method, DetectionMethod::SmartDetection);
        assert!((window.swing_start - 4.0).abs() < 1e-9);
        assert!((window.swing_end - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_noisy_timeline_properties() {
        // Deterministic pseudo-random scores
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let scores: Vec<f64> = (0..400)
            .map(|_| {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                ((state >> 33) % 1000) as f64 / 4000.0
            })
            .collect();
        let config = SwingDetectionConfig::default();
        let timeline = MotionTimeline::from_scores(&scores, 0.1);
        let events = find_motion_events(&timeline, &config);

        for pair in events.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for event in &events {
            assert!(event.end > event.start);
            assert!(event.avg_motion <= event.peak_motion);
            let score = score_swing_probability(event, &config);
            assert!((0.0..=1.0).contains(&score.total));
        }

        let first = classify(&events, 40.0, &config);
        let second = classify(&events, 40.0, &config);
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first.confidence));
    }
}

#[cfg(test)]
mod detector_scenarios {
    use crate::error::{MediaError, MediaResult};
    use crate::probe::{VideoInfo, VideoProber};
    use crate::sampler::FrameSampler;
    use crate::swing_detection::{extract_phase_frames, SwingDetectionConfig, SwingDetector};
    use async_trait::async_trait;
    use image::{DynamicImage, GrayImage, Luma};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use swing_models::DetectionMethod;

    struct FixedProber(Option<VideoInfo>);

    #[async_trait]
    impl VideoProber for FixedProber {
        async fn probe(&self, _video: &Path) -> MediaResult<VideoInfo> {
            self.0
                .ok_or_else(|| MediaError::InvalidVideo("no streams".to_string()))
        }
    }

    /// Alternates frame brightness inside `[swing.0, swing.1)`; dark elsewhere.
    struct SwingSampler {
        swing: (f64, f64),
        end: f64,
    }

    #[async_trait]
    impl FrameSampler for SwingSampler {
        async fn sample(&self, _video: &Path, timestamp: f64) -> MediaResult<DynamicImage> {
            if timestamp > self.end {
                return Err(MediaError::frame_unavailable(timestamp));
            }
            let index = (timestamp * 10.0).round() as u64;
            let in_swing = timestamp >= self.swing.0 && timestamp < self.swing.1;
            let level = if in_swing && index % 2 == 1 { 40 } else { 0 };
            Ok(DynamicImage::ImageLuma8(GrayImage::from_pixel(
                16,
                12,
                Luma([level]),
            )))
        }
    }

    struct BrokenSampler;

    #[async_trait]
    impl FrameSampler for BrokenSampler {
        async fn sample(&self, _video: &Path, _timestamp: f64) -> MediaResult<DynamicImage> {
            Err(MediaError::ffmpeg_failed("decoder missing", None, Some(1)))
        }
    }

    #[tokio::test]
    async fn test_detects_swing_in_synthetic_video() {
        let detector = SwingDetector::default();
        let sampler = SwingSampler {
            swing: (2.0, 4.0),
            end: 10.0,
        };
        let detection = detector
            .detect(
                Path::new("swing.mov"),
                &FixedProber(Some(VideoInfo::new(10.0, 30.0))),
                &sampler,
            )
            .await
            .unwrap();

        assert_eq!(detection.sample_count, 100);
        assert_eq!(detection.event_count, 1);
        assert_eq!(detection.window.method, DetectionMethod::SmartDetection);
        assert!((detection.window.swing_start - 2.1).abs() < 1e-9);
        assert!((detection.window.swing_end - 4.1).abs() < 1e-9);
        assert!(detection.window.confidence > 0.3);

        let frames = extract_phase_frames(&sampler, Path::new("swing.mov"), &detection.window).await;
        assert_eq!(frames.len(), 9);
    }

    #[tokio::test]
    async fn test_probe_failure_uses_default_metadata() {
        let detector = SwingDetector::default();
        let sampler = SwingSampler {
            swing: (0.0, 0.0),
            end: 60.0,
        };
        let detection = detector
            .detect(Path::new("swing.mov"), &FixedProber(None), &sampler)
            .await
            .unwrap();

        assert_eq!(detection.video_info, VideoInfo::default());
        assert_eq!(detection.sample_count, 300);
        assert_eq!(detection.event_count, 0);
        assert_eq!(detection.window.method, DetectionMethod::FallbackTiming);
        assert!((detection.window.swing_start - 10.5).abs() < 1e-9);
        assert!((detection.window.swing_end - 19.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_frames_is_fatal() {
        let detector = SwingDetector::default();
        let result = detector
            .detect(
                Path::new("broken.mov"),
                &FixedProber(Some(VideoInfo::new(1.0, 30.0))),
                &BrokenSampler,
            )
            .await;

        assert!(matches!(
            result,
            Err(MediaError::NoFramesExtracted { requested: 10 })
        ));
    }

    struct MissingFfmpegSampler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FrameSampler for MissingFfmpegSampler {
        async fn sample(&self, _video: &Path, _timestamp: f64) -> MediaResult<DynamicImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(MediaError::FfmpegNotFound)
        }
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_surfaces_real_cause() {
        let detector = SwingDetector::default();
        let sampler = MissingFfmpegSampler {
            calls: AtomicUsize::new(0),
        };
        let result = detector
            .detect(
                Path::new("swing.mov"),
                &FixedProber(Some(VideoInfo::new(30.0, 30.0))),
                &sampler,
            )
            .await;

        assert!(matches!(result, Err(MediaError::FfmpegNotFound)));
        assert_eq!(sampler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sub_interval_video_uses_timing_fallback() {
        let detector = SwingDetector::default();
        let detection = detector
            .detect(
                Path::new("tiny.mov"),
                &FixedProber(Some(VideoInfo::new(0.05, 30.0))),
                &BrokenSampler,
            )
            .await
            .unwrap();

        assert_eq!(detection.sample_count, 0);
        assert_eq!(detection.window.method, DetectionMethod::FallbackTiming);
    }

    #[tokio::test]
    async fn test_short_clip_tolerates_missing_tail() {
        // Probe reports more duration than the sampler can serve
        let detector = SwingDetector::new(SwingDetectionConfig::default());
        let sampler = SwingSampler {
            swing: (1.0, 3.0),
            end: 4.95,
        };
        let detection = detector
            .detect(
                Path::new("swing.mov"),
                &FixedProber(Some(VideoInfo::new(6.0, 30.0))),
                &sampler,
            )
            .await
            .unwrap();

        assert_eq!(detection.sample_count, 50);
        assert_eq!(detection.window.method, DetectionMethod::SmartDetection);
    }
}
