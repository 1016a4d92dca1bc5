//! The video catalog port and its Postgres adapter.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use vidsite_models::{VideoId, VideoRecord, VideoSummary};

use crate::error::StoreResult;

/// Persistent video catalog.
///
/// The finalizer inserts rows here, the id allocator checks candidates for
/// collisions, and the listing endpoint pages over committed videos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Commit a finished video.
    async fn insert(&self, record: &VideoRecord) -> StoreResult<()>;

    /// True if the id already belongs to a committed video.
    async fn exists(&self, id: &VideoId) -> StoreResult<bool>;

    /// Page of videos for the listing endpoint. With `public` set this lists
    /// other users' videos (owner column included); otherwise the caller's
    /// own non-private videos.
    async fn list(
        &self,
        owner: i64,
        limit: i64,
        offset: i64,
        public: bool,
    ) -> StoreResult<Vec<VideoSummary>>;
}

/// PostgreSQL-backed implementation of the [`VideoCatalog`] port.
#[derive(Clone, Debug)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoCatalog for PostgresCatalog {
    async fn insert(&self, record: &VideoRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO videos (id, owner, title, duration, private) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id.as_str())
        .bind(record.owner)
        .bind(&record.title)
        .bind(record.duration)
        .bind(record.private)
        .execute(&self.pool)
        .await?;

        info!(video_id = %record.id, owner = record.owner, "Committed video");
        Ok(())
    }

    async fn exists(&self, id: &VideoId) -> StoreResult<bool> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM videos WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn list(
        &self,
        owner: i64,
        limit: i64,
        offset: i64,
        public: bool,
    ) -> StoreResult<Vec<VideoSummary>> {
        let query = if public {
            "SELECT id, title, duration, views, owner, upload_date \
             FROM videos WHERE owner != $1 \
             ORDER BY upload_date DESC LIMIT $2 OFFSET $3"
        } else {
            "SELECT id, title, duration, views, NULL::BIGINT AS owner, upload_date \
             FROM videos WHERE owner = $1 AND private = false \
             ORDER BY upload_date DESC LIMIT $2 OFFSET $3"
        };

        // Offset is in pages; the query wants rows. Saturate rather than wrap
        // on extreme values, which simply yields an empty page.
        let rows = sqlx::query_as::<_, VideoSummary>(query)
            .bind(owner)
            .bind(limit)
            .bind(offset.saturating_mul(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
