//! Persisted video catalog rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::VideoId;

/// A committed video row, written by the finalizer once the encode completes.
/// Never created speculatively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Video id, doubles as the artifact directory name
    pub id: VideoId,
    /// Owning user id
    pub owner: i64,
    /// Display title
    pub title: String,
    /// Duration in seconds
    pub duration: f64,
    /// Visibility flag; uploads are public by default
    pub private: bool,
}

impl VideoRecord {
    /// Build the record the finalizer commits for a finished job.
    pub fn from_job(id: VideoId, job: &crate::job::TranscodeJob) -> Self {
        Self {
            id,
            owner: job.owner,
            title: job.title.clone(),
            duration: job.duration,
            private: false,
        }
    }
}

/// Listing row returned by the catalog for the videos endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub duration: f64,
    pub views: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
    pub upload_date: DateTime<Utc>,
}
