//! Redis-backed shared progress store.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use vidsite_models::{TranscodeJob, VideoId};

use crate::error::StoreResult;
use crate::progress::ProgressStore;

/// Key prefix for transcode job entries.
const JOB_KEY_PREFIX: &str = "transcode:";

/// TTL on job entries. There is no dead-job reaper; if an encoder crashes
/// mid-job its record simply ages out after this long.
const JOB_TTL_SECS: u64 = 24 * 60 * 60;

/// Shared progress store holding serialized jobs in redis, visible to every
/// server instance behind the load balancer.
pub struct RedisProgressStore {
    client: redis::Client,
}

impl RedisProgressStore {
    /// Create a new store from a redis URL.
    pub fn new(redis_url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    fn job_key(id: &VideoId) -> String {
        format!("{}{}", JOB_KEY_PREFIX, id)
    }
}

#[async_trait]
impl ProgressStore for RedisProgressStore {
    async fn put(&self, id: &VideoId, job: &TranscodeJob) -> StoreResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(job)?;
        debug!(video_id = %id, progress = job.progress, "Writing job to redis");
        conn.set_ex::<_, _, ()>(Self::job_key(id), payload, JOB_TTL_SECS)
            .await?;
        Ok(())
    }

    async fn get(&self, id: &VideoId) -> StoreResult<Option<TranscodeJob>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(Self::job_key(id)).await?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &VideoId) -> StoreResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(Self::job_key(id)).await?;
        Ok(())
    }
}
