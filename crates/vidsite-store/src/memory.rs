//! In-process progress store backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use vidsite_models::{TranscodeJob, VideoId};

use crate::error::StoreResult;
use crate::progress::ProgressStore;

/// Mapping from video id to transcode job held in process memory.
///
/// Valid only for a single-instance deployment; other processes cannot see
/// these entries.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    jobs: RwLock<HashMap<VideoId, TranscodeJob>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn put(&self, id: &VideoId, job: &TranscodeJob) -> StoreResult<()> {
        self.jobs.write().await.insert(id.clone(), job.clone());
        Ok(())
    }

    async fn get(&self, id: &VideoId) -> StoreResult<Option<TranscodeJob>> {
        Ok(self.jobs.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &VideoId) -> StoreResult<()> {
        self.jobs.write().await.remove(id);
        Ok(())
    }
}
