//! Collision-checked video id allocation.

use vidsite_models::encoding::MAX_ID_ATTEMPTS;
use vidsite_models::VideoId;

use crate::catalog::VideoCatalog;
use crate::error::{StoreError, StoreResult};

/// Allocate a video id that does not collide with any committed video.
///
/// Candidates are resampled until the catalog reports no collision. The id is
/// not reserved; the caller must use it promptly (the narrow window between
/// check and use is accepted). The attempt cap exists so a broken catalog can
/// never turn this into an infinite loop.
pub async fn allocate_id(catalog: &dyn VideoCatalog) -> StoreResult<VideoId> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = VideoId::random();
        if !catalog.exists(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(StoreError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockVideoCatalog;

    #[tokio::test]
    async fn test_first_candidate_free() {
        let mut catalog = MockVideoCatalog::new();
        catalog.expect_exists().times(1).returning(|_| Ok(false));

        let id = allocate_id(&catalog).await.unwrap();
        assert!(VideoId::is_well_formed(id.as_str()));
    }

    #[tokio::test]
    async fn test_resamples_on_collision() {
        let mut catalog = MockVideoCatalog::new();
        let mut calls = 0;
        catalog.expect_exists().times(2).returning(move |_| {
            calls += 1;
            Ok(calls == 1)
        });

        // First candidate collides, second is returned
        let id = allocate_id(&catalog).await.unwrap();
        assert!(VideoId::is_well_formed(id.as_str()));
    }

    #[tokio::test]
    async fn test_fails_loudly_when_exhausted() {
        let mut catalog = MockVideoCatalog::new();
        catalog
            .expect_exists()
            .times(MAX_ID_ATTEMPTS)
            .returning(|_| Ok(true));

        match allocate_id(&catalog).await {
            Err(StoreError::IdSpaceExhausted(n)) => assert_eq!(n, MAX_ID_ATTEMPTS),
            other => panic!("expected exhaustion, got {:?}", other.map(|id| id.to_string())),
        }
    }
}
