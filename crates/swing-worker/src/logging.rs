//! Structured analysis logging utilities.
//!
//! Provides consistent, structured logging for swing analyses with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};

/// Analysis logger for structured logging with consistent formatting.
///
/// Every event carries the analysis id and operation as fields.
#[derive(Debug, Clone)]
pub struct AnalysisLogger {
    analysis_id: String,
    operation: String,
}

impl AnalysisLogger {
    /// Create a new logger for a specific analysis and operation.
    ///
    /// # Arguments
    /// * `analysis_id` - The unique identifier for the analysis
    /// * `operation` - The type of operation (e.g., "swing_extraction")
    pub fn new(analysis_id: &str, operation: &str) -> Self {
        Self {
            analysis_id: analysis_id.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Log the start of an analysis operation.
    pub fn log_start(&self, message: &str) {
        info!(
            analysis_id = %self.analysis_id,
            operation = %self.operation,
            "Analysis started: {}", message
        );
    }

    /// Log a progress update.
    pub fn log_progress(&self, message: &str) {
        info!(
            analysis_id = %self.analysis_id,
            operation = %self.operation,
            "Analysis progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            analysis_id = %self.analysis_id,
            operation = %self.operation,
            "Analysis warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            analysis_id = %self.analysis_id,
            operation = %self.operation,
            "Analysis error: {}", message
        );
    }

    /// Log the completion of an analysis operation.
    pub fn log_completion(&self, message: &str) {
        info!(
            analysis_id = %self.analysis_id,
            operation = %self.operation,
            "Analysis completed: {}", message
        );
    }

    pub fn analysis_id(&self) -> &str {
        &self.analysis_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Create a tracing span for this analysis.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "analysis",
            analysis_id = %self.analysis_id,
            operation = %self.operation
        )
    }
}
