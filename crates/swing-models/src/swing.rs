//! Swing window models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// How a swing window was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// A motion event cleared the candidacy threshold and scored best
    SmartDetection,
    /// No event qualified; the longest motion event was used
    FallbackLongest,
    /// No motion events at all; the middle of the video was assumed
    FallbackTiming,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::SmartDetection => "smart_detection",
            DetectionMethod::FallbackLongest => "fallback_longest",
            DetectionMethod::FallbackTiming => "fallback_timing",
        }
    }

    /// Whether the window came from a fallback policy.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, DetectionMethod::SmartDetection)
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DetectionMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart_detection" => Ok(DetectionMethod::SmartDetection),
            "fallback_longest" => Ok(DetectionMethod::FallbackLongest),
            "fallback_timing" => Ok(DetectionMethod::FallbackTiming),
            other => Err(ModelError::UnknownDetectionMethod(other.to_string())),
        }
    }
}

/// The time interval believed to contain the golf swing.
///
/// Produced once per video by the swing detector; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwingWindow {
    /// Start of the swing in seconds
    pub swing_start: f64,
    /// End of the swing in seconds
    pub swing_end: f64,
    /// Confidence in the window (0.0-1.0)
    pub confidence: f64,
    /// `swing_end - swing_start` in seconds
    pub duration: f64,
    /// How the window was chosen
    pub method: DetectionMethod,
}

impl SwingWindow {
    /// Create a window spanning `[start, end]`.
    ///
    /// Confidence is clamped into `[0, 1]`.
    pub fn new(start: f64, end: f64, confidence: f64, method: DetectionMethod) -> Self {
        Self {
            swing_start: start,
            swing_end: end,
            confidence: confidence.clamp(0.0, 1.0),
            duration: end - start,
            method,
        }
    }

    /// Timestamp at a fraction (0.0-1.0) of the way through the swing.
    pub fn timestamp_at(&self, fraction: f64) -> f64 {
        self.swing_start + self.duration * fraction
    }

    /// Whether `timestamp` falls inside the window (inclusive).
    pub fn contains(&self, timestamp: f64) -> bool {
        timestamp >= self.swing_start && timestamp <= self.swing_end
    }
}

impl fmt::Display for SwingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}s-{:.1}s ({}, confidence {:.2})",
            self.swing_start, self.swing_end, self.method, self.confidence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_duration() {
        let window = SwingWindow::new(1.5, 4.0, 0.8, DetectionMethod::SmartDetection);
        assert!((window.duration - 2.5).abs() < 1e-9);
        assert!(window.contains(2.0));
        assert!(!window.contains(4.1));
    }

    #[test]
    fn test_confidence_clamped() {
        let window = SwingWindow::new(0.0, 1.0, 1.7, DetectionMethod::SmartDetection);
        assert_eq!(window.confidence, 1.0);
    }

    #[test]
    fn test_timestamp_at() {
        let window = SwingWindow::new(10.0, 13.0, 0.5, DetectionMethod::FallbackLongest);
        assert!((window.timestamp_at(0.5) - 11.5).abs() < 1e-9);
        assert!((window.timestamp_at(1.0) - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&DetectionMethod::FallbackTiming).unwrap();
        assert_eq!(json, "\"fallback_timing\"");

        let window = SwingWindow::new(0.0, 2.0, 0.9, DetectionMethod::SmartDetection);
        let value = serde_json::to_value(window).unwrap();
        assert_eq!(value["method"], "smart_detection");
        assert_eq!(value["swing_end"], 2.0);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "fallback_longest".parse::<DetectionMethod>().unwrap(),
            DetectionMethod::FallbackLongest
        );
        assert!("guess".parse::<DetectionMethod>().is_err());
        assert!(DetectionMethod::FallbackTiming.is_fallback());
        assert!(!DetectionMethod::SmartDetection.is_fallback());
    }
}
