//! Swing-likelihood scoring and window selection.
//!
//! Each motion event is scored on four heuristics:
//!
//! - **Duration**: golf swings last roughly 2-4 seconds
//! - **Intensity**: a swing produces a strong motion peak
//! - **Progression**: motion builds from address towards impact
//! - **Sustain**: elevated motion is held rather than a single spike
//!
//! The best event above the candidacy threshold becomes the swing window.
//! When nothing qualifies, the longest event is used; when there are no
//! events at all, the middle of the video is assumed.

use metrics::counter;
use serde::{Deserialize, Serialize};
use swing_models::{DetectionMethod, SwingWindow};
use tracing::{debug, info};

use super::config::SwingDetectionConfig;
use super::segmenter::MotionEvent;

/// Sub-score breakdown for one motion event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingScore {
    pub duration: f64,
    pub intensity: f64,
    pub progression: f64,
    pub sustain: f64,
    /// Weighted sum, capped at 1.0
    pub total: f64,
}

/// Score how likely `event` is to be a golf swing.
pub fn score_swing_probability(event: &MotionEvent, config: &SwingDetectionConfig) -> SwingScore {
    let duration = duration_score(event.duration, config);
    let intensity = intensity_score(event.peak_motion, config);
    let progression = progression_score(&event.motion_scores, config);
    let sustain = sustain_score(&event.motion_scores, event.peak_motion, config);

    let w = &config.weights;
    let total = (duration * w.duration
        + intensity * w.intensity
        + progression * w.progression
        + sustain * w.sustain)
        .clamp(0.0, 1.0);

    SwingScore {
        duration,
        intensity,
        progression,
        sustain,
        total,
    }
}

fn duration_score(d: f64, config: &SwingDetectionConfig) -> f64 {
    let (ideal_lo, ideal_hi) = config.ideal_duration;

    if d < config.min_duration || d > config.max_duration {
        0.0
    } else if d < ideal_lo {
        d / ideal_lo
    } else if d <= ideal_hi {
        1.0
    } else {
        (config.max_duration - d) / (config.max_duration - ideal_hi)
    }
}

fn intensity_score(peak: f64, config: &SwingDetectionConfig) -> f64 {
    if peak > config.intensity_floor {
        (peak / config.intensity_full_scale).min(1.0)
    } else {
        0.0
    }
}

fn progression_score(scores: &[f64], config: &SwingDetectionConfig) -> f64 {
    let n = scores.len();
    if n < config.min_progression_samples {
        return config.short_event_progression;
    }

    // Leading floor(n/3), trailing ceil(n/3)
    let first = &scores[..n / 3];
    let last = &scores[n - n.div_ceil(3)..];

    let first_max = first.iter().copied().fold(0.0, f64::max);
    let last_max = last.iter().copied().fold(0.0, f64::max);

    if first_max > 0.0 {
        (last_max / first_max / 2.0).min(1.0)
    } else {
        0.5
    }
}

fn sustain_score(scores: &[f64], peak: f64, config: &SwingDetectionConfig) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let threshold = peak * config.sustain_ratio;
    let sustained = scores.iter().filter(|&&s| s > threshold).count();
    let fraction = sustained as f64 / scores.len() as f64;
    (fraction * 2.0).min(1.0)
}

/// Choose the swing window from the segmented events.
///
/// Pure function of its inputs; events are expected in start order.
pub fn classify(
    events: &[MotionEvent],
    video_duration: f64,
    config: &SwingDetectionConfig,
) -> SwingWindow {
    let window = select_window(events, video_duration, config);

    counter!("swing_detections_total", "method" => window.method.as_str()).increment(1);
    info!(
        swing_start = format!("{:.2}", window.swing_start),
        swing_end = format!("{:.2}", window.swing_end),
        confidence = format!("{:.2}", window.confidence),
        method = %window.method,
        "Swing window selected"
    );

    window
}

fn select_window(
    events: &[MotionEvent],
    video_duration: f64,
    config: &SwingDetectionConfig,
) -> SwingWindow {
    if events.is_empty() {
        let (lo, hi) = config.fallback_window;
        debug!(video_duration, "No motion events, using timing fallback");
        return SwingWindow::new(
            video_duration * lo,
            video_duration * hi,
            config.fallback_timing_confidence,
            DetectionMethod::FallbackTiming,
        );
    }

    let mut best: Option<(&MotionEvent, f64)> = None;

    for (i, event) in events.iter().enumerate() {
        let score = score_swing_probability(event, config);
        debug!(
            event = i,
            start = format!("{:.2}", event.start),
            end = format!("{:.2}", event.end),
            duration = format!("{:.2}", score.duration),
            intensity = format!("{:.2}", score.intensity),
            progression = format!("{:.2}", score.progression),
            sustain = format!("{:.2}", score.sustain),
            total = format!("{:.3}", score.total),
            "Scored motion event"
        );

        if score.total <= config.candidate_threshold {
            continue;
        }
        // Strict comparison keeps the earliest event on ties
        if best.map_or(true, |(_, s)| score.total > s) {
            best = Some((event, score.total));
        }
    }

    if let Some((event, score)) = best {
        return SwingWindow::new(event.start, event.end, score, DetectionMethod::SmartDetection);
    }

    let mut longest = &events[0];
    for event in &events[1..] {
        if event.duration > longest.duration {
            longest = event;
        }
    }

    debug!(
        events = events.len(),
        "No event cleared the candidacy threshold, using longest event"
    );
    SwingWindow::new(
        longest.start,
        longest.end,
        config.fallback_longest_confidence,
        DetectionMethod::FallbackLongest,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64, scores: Vec<f64>) -> MotionEvent {
        let peak_motion = scores.iter().copied().fold(0.0, f64::max);
        let avg_motion = scores.iter().sum::<f64>() / scores.len() as f64;
        MotionEvent {
            start,
            end,
            duration: end - start,
            peak_motion,
            avg_motion,
            motion_scores: scores,
        }
    }

    fn config() -> SwingDetectionConfig {
        SwingDetectionConfig::default()
    }

    #[test]
    fn test_duration_score_curve() {
        let c = config();
        assert_eq!(duration_score(0.5, &c), 0.0);
        assert_eq!(duration_score(1.0, &c), 0.5);
        assert_eq!(duration_score(1.5, &c), 0.75);
        assert_eq!(duration_score(2.0, &c), 1.0);
        assert_eq!(duration_score(4.0, &c), 1.0);
        assert_eq!(duration_score(5.0, &c), 0.5);
        assert_eq!(duration_score(6.0, &c), 0.0);
        assert_eq!(duration_score(7.0, &c), 0.0);
    }

    #[test]
    fn test_intensity_score() {
        let c = config();
        assert_eq!(intensity_score(0.1, &c), 0.0);
        assert!((intensity_score(0.15, &c) - 0.75).abs() < 1e-12);
        assert_eq!(intensity_score(0.5, &c), 1.0);
    }

    #[test]
    fn test_progression_short_event() {
        assert_eq!(progression_score(&[0.1, 0.2, 0.3], &config()), 0.3);
    }

    #[test]
    fn test_progression_uses_uneven_thirds() {
        // n = 7: first = [0..2), last = [4..7)
        let scores = [0.1, 0.1, 0.9, 0.0, 0.4, 0.0, 0.0];
        assert!((progression_score(&scores, &config()) - 1.0).abs() < 1e-12);

        let flat = [0.2; 6];
        assert!((progression_score(&flat, &config()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_progression_silent_start() {
        let scores = [0.0, 0.0, 0.1, 0.2, 0.3, 0.4];
        assert_eq!(progression_score(&scores, &config()), 0.5);
    }

    #[test]
    fn test_sustain_score() {
        let c = config();
        // 2 of 10 above 0.6 * peak -> 0.2 * 2
        let scores = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0];
        assert!((sustain_score(&scores, 1.0, &c) - 0.4).abs() < 1e-12);
        assert_eq!(sustain_score(&[1.0, 1.0], 1.0, &c), 1.0);
        assert_eq!(sustain_score(&[], 0.0, &c), 0.0);
    }

    #[test]
    fn test_total_is_bounded() {
        let e = event(0.0, 3.0, vec![0.05, 0.1, 0.2, 0.4, 0.8, 0.9, 0.9]);
        let score = score_swing_probability(&e, &config());
        assert!(score.total >= 0.0 && score.total <= 1.0);
    }

    #[test]
    fn test_no_events_uses_timing_fallback() {
        let window = classify(&[], 20.0, &config());
        assert_eq!(window.method, DetectionMethod::FallbackTiming);
        assert!((window.swing_start - 7.0).abs() < 1e-9);
        assert!((window.swing_end - 13.0).abs() < 1e-9);
        assert_eq!(window.confidence, 0.3);
    }

    #[test]
    fn test_weak_events_use_longest_fallback() {
        // All below the 0.1 intensity floor and too short
        let spike = |n: usize| {
            let mut scores = vec![0.0; n];
            scores[0] = 0.05;
            scores
        };
        let events = vec![
            event(1.0, 1.4, spike(4)),
            event(2.0, 2.8, spike(8)),
            event(4.0, 4.6, spike(8)),
        ];
        let window = classify(&events, 10.0, &config());
        assert_eq!(window.method, DetectionMethod::FallbackLongest);
        assert_eq!(window.swing_start, 2.0);
        assert_eq!(window.confidence, 0.5);
    }

    #[test]
    fn test_score_equal_to_threshold_is_not_a_candidate() {
        let e = event(1.0, 3.5, vec![0.1, 0.12, 0.15, 0.18, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2]);
        let total = score_swing_probability(&e, &config()).total;

        let at = config().with_candidate_threshold(total);
        let window = classify(std::slice::from_ref(&e), 10.0, &at);
        assert_eq!(window.method, DetectionMethod::FallbackLongest);
        assert_eq!(window.confidence, 0.5);

        let below = config().with_candidate_threshold(total - 1e-9);
        let window = classify(std::slice::from_ref(&e), 10.0, &below);
        assert_eq!(window.method, DetectionMethod::SmartDetection);
    }

    #[test]
    fn test_longest_fallback_tie_keeps_first() {
        let weak = vec![0.05, 0.0, 0.0, 0.0, 0.0];
        let events = vec![
            event(1.0, 1.5, weak.clone()),
            event(3.0, 3.5, weak),
        ];
        assert_eq!(events[0].duration, events[1].duration);

        let window = classify(&events, 10.0, &config());
        assert_eq!(window.method, DetectionMethod::FallbackLongest);
        assert_eq!(window.swing_start, 1.0);
        assert_eq!(window.swing_end, 1.5);
    }

    #[test]
    fn test_ties_keep_earliest() {
        let scores = vec![0.1, 0.12, 0.15, 0.18, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2];
        let events = vec![
            event(1.0, 3.5, scores.clone()),
            event(5.0, 7.5, scores),
        ];
        let window = classify(&events, 10.0, &config());
        assert_eq!(window.method, DetectionMethod::SmartDetection);
        assert_eq!(window.swing_start, 1.0);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let events = vec![
            event(0.5, 1.0, vec![0.3; 5]),
            event(2.0, 4.5, vec![0.05, 0.1, 0.15, 0.2, 0.18, 0.16]),
        ];
        let c = config();
        assert_eq!(classify(&events, 8.0, &c), classify(&events, 8.0, &c));
    }
}
