//! Storage key conventions.
//!
//! Uploaded swing videos live under `golf-swings/{user_id}/{analysis_id}.{ext}`
//! and extracted frames are written under `analyses/{analysis_id}/`.

use uuid::Uuid;

use crate::phase::SwingPhase;

/// Prefix for uploaded swing videos.
pub const VIDEO_PREFIX: &str = "golf-swings";

/// User id reported when a key does not follow the upload convention.
pub const UNKNOWN_USER: &str = "unknown-user";

/// Video container extensions stripped from the analysis id.
const VIDEO_EXTENSIONS: &[&str] = &[".mov", ".mp4", ".avi"];

/// Identity derived from an uploaded video's storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoKey {
    pub user_id: String,
    pub analysis_id: String,
}

impl VideoKey {
    /// Parse a storage key, generating an analysis id when the key has none.
    pub fn parse(key: &str) -> Self {
        let parts: Vec<&str> = key.trim_matches('/').split('/').collect();

        let user_id = match parts.as_slice() {
            [prefix, user, ..] if *prefix == VIDEO_PREFIX && !user.is_empty() => user.to_string(),
            _ => UNKNOWN_USER.to_string(),
        };

        let analysis_id = parts
            .get(2)
            .map(|file| strip_video_extension(file))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            user_id,
            analysis_id,
        }
    }

    /// Storage key for the frame at `index` of this analysis.
    pub fn frame_key(&self, index: usize, phase: SwingPhase) -> String {
        frame_key(&self.analysis_id, index, phase)
    }

    /// Storage key for this analysis' result document.
    pub fn analysis_key(&self) -> String {
        analysis_key(&self.analysis_id)
    }
}

/// Storage key for an extracted frame.
pub fn frame_key(analysis_id: &str, index: usize, phase: SwingPhase) -> String {
    format!("analyses/{}/frame_{:03}_{}.jpg", analysis_id, index, phase.file_tag())
}

/// Storage key for an analysis result document.
pub fn analysis_key(analysis_id: &str) -> String {
    format!("analyses/{}/analysis.json", analysis_id)
}

fn strip_video_extension(file: &str) -> &str {
    VIDEO_EXTENSIONS
        .iter()
        .find_map(|ext| file.strip_suffix(ext))
        .unwrap_or(file)
}
