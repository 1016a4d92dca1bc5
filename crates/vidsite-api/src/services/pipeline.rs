//! Transcode dispatch, finalization and cleanup.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};

use vidsite_media::{encode, thumbnail, video_duration};
use vidsite_models::encoding::{
    COMPRESSED_FILE_NAME, THUMBNAIL_FILE_NAME, THUMBNAIL_LOWRES_FILE_NAME,
};
use vidsite_models::{TranscodeJob, VideoId, VideoRecord};

use crate::error::ApiResult;
use crate::state::AppState;

/// Delay before retrying artifact deletion; the encoder may still hold the
/// output file open when a finalize failure triggers cleanup.
const CLEANUP_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Artifact directory for a video.
pub fn video_dir(state: &AppState, id: &VideoId) -> PathBuf {
    state.config.video_root.join(id.as_str())
}

/// Probe the source, record the initial job and launch the encoder.
///
/// Returns as soon as the jobs are launched; only the low resolution
/// thumbnail is extracted synchronously. A launch failure bubbles up and the
/// caller runs [`cleanup`].
pub async fn dispatch(
    state: &AppState,
    id: &VideoId,
    source: &std::path::Path,
    owner: i64,
    title: &str,
) -> ApiResult<TranscodeJob> {
    let dir = video_dir(state, id);

    let duration = video_duration(source).await?;

    let job = TranscodeJob::new(owner, title, duration);
    state.progress.put(id, &job).await?;

    encode::spawn_encode(
        source,
        dir.join(COMPRESSED_FILE_NAME),
        &state.config.progress_callback_url(id),
    )?;
    thumbnail::spawn_thumbnail(source, dir.join(THUMBNAIL_FILE_NAME))?;
    thumbnail::extract_thumbnail_lowres(source, dir.join(THUMBNAIL_LOWRES_FILE_NAME)).await?;

    info!(video_id = %id, duration, "Transcode dispatched");
    Ok(job)
}

/// Commit a completed job to the catalog.
///
/// The caller passes the job it already holds rather than this function
/// re-reading the store: a poll can reclaim the entry between the encoder's
/// final report and the end marker, and a re-read at that moment would lose a
/// finished encode. A failed insert defers to [`cleanup`], discarding the
/// encoded artifacts even though the encode itself succeeded.
pub async fn finalize(state: &AppState, id: &VideoId, job: &TranscodeJob) -> ApiResult<()> {
    if let Err(e) = state
        .catalog
        .insert(&VideoRecord::from_job(id.clone(), job))
        .await
    {
        error!(video_id = %id, error = %e, "Finalize failed, discarding artifacts");
        // Give the encoder a moment to release the output file
        tokio::time::sleep(CLEANUP_RETRY_DELAY).await;
        cleanup(state, id).await;
        return Err(e.into());
    }
    Ok(())
}

/// Remove every trace of a failed or abandoned upload.
///
/// Idempotent: missing directories and absent job entries are fine. Directory
/// deletion is retried once after a short delay in case the encoder still has
/// a file open.
pub async fn cleanup(state: &AppState, id: &VideoId) {
    let dir = video_dir(state, id);

    if let Err(first) = remove_dir_if_present(&dir).await {
        warn!(video_id = %id, error = %first, "Artifact removal failed, retrying");
        tokio::time::sleep(CLEANUP_RETRY_DELAY).await;
        if let Err(second) = remove_dir_if_present(&dir).await {
            error!(video_id = %id, error = %second, "Could not remove artifact directory");
        }
    }

    if let Err(e) = state.progress.delete(id).await {
        warn!(video_id = %id, error = %e, "Could not drop transcode job entry");
    }
}

async fn remove_dir_if_present(dir: &std::path::Path) -> std::io::Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
