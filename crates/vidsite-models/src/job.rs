//! In-flight transcode job record.

use serde::{Deserialize, Serialize};

/// Progress record tracked while an encode is in flight.
///
/// While the encode runs this is the single source of truth for the video:
/// created by the dispatcher with progress 0, advanced only by the progress
/// ingestion endpoint, and superseded by the persisted catalog row once the
/// finalizer commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscodeJob {
    /// Owning user id
    pub owner: i64,
    /// Display title (the uploaded file's original name)
    pub title: String,
    /// Total duration in seconds, probed from the source before encoding
    pub duration: f64,
    /// Elapsed output time in seconds, monotonically approaching `duration`
    pub progress: f64,
}

impl TranscodeJob {
    /// Create a fresh job with no progress.
    pub fn new(owner: i64, title: impl Into<String>, duration: f64) -> Self {
        Self {
            owner,
            title: title.into(),
            duration,
            progress: 0.0,
        }
    }

    /// Progress percentage, clamped to [0, 100].
    pub fn percent(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.progress / self.duration * 100.0).clamp(0.0, 100.0)
    }

    /// Force progress to exactly the known duration, snapping away any
    /// rounding error from the encoder's microsecond reports.
    pub fn snap_complete(&mut self) {
        self.progress = self.duration;
    }

    /// True once the completion snap has run. The encoder's final elapsed-time
    /// report can land at or past the probed duration while the encode is
    /// still being committed, so exact equality here distinguishes the snapped
    /// terminal state from a last in-flight report.
    pub fn is_complete(&self) -> bool {
        self.duration > 0.0 && self.progress == self.duration
    }
}
