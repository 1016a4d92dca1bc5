//! The progress store port.

use async_trait::async_trait;

use vidsite_models::{TranscodeJob, VideoId};

use crate::error::StoreResult;

/// Key/value store for in-flight transcode jobs.
///
/// Two interchangeable backends exist: [`crate::MemoryProgressStore`] for a
/// single server instance and [`crate::RedisProgressStore`] when several
/// instances may receive the encoder callback or the progress poll for the
/// same job. Both support the read-modify-write pattern the ingestion
/// endpoint relies on, and querying an absent id yields `None`, never an
/// error.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Store or replace the job for a video. Last write wins.
    async fn put(&self, id: &VideoId, job: &TranscodeJob) -> StoreResult<()>;

    /// Fetch the job for a video, if one is in flight.
    async fn get(&self, id: &VideoId) -> StoreResult<Option<TranscodeJob>>;

    /// Drop the job for a video. Idempotent; deleting an absent key is fine,
    /// which keeps the poller's and the finalizer's reclamation race safe.
    async fn delete(&self, id: &VideoId) -> StoreResult<()>;
}
