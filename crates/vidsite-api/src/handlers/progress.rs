//! Transcode progress: caller-facing poll and the encoder's ingestion callback.

use std::io;
use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::HeaderMap;
use axum::Json;
use futures::TryStreamExt;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;
use tracing::{info, warn};

use vidsite_models::VideoId;

use crate::error::{ApiError, ApiResult};
use crate::guard::ensure_loopback;
use crate::services::pipeline;
use crate::state::AppState;

/// Marker line the encoder sends when the encode is done.
const END_MARKER: &str = "progress=end";

/// Prefix of the elapsed-time status line, value in microseconds.
const OUT_TIME_PREFIX: &str = "out_time_us=";

/// Ids double as artifact directory names, so a malformed path parameter is
/// rejected before it can reach any store or filesystem path.
fn parse_id(raw: String) -> ApiResult<VideoId> {
    if !VideoId::is_well_formed(&raw) {
        return Err(ApiError::not_found(format!(
            "No progress for video: \"{raw}\""
        )));
    }
    Ok(VideoId::from(raw))
}

#[derive(Serialize)]
pub struct ProgressResponse {
    /// Percent complete, 0 to 100
    pub progress: f64,
}

/// Poll transcode progress for a video.
///
/// Once a caller observes a snapped-complete job the record has served its
/// purpose and is dropped; a later poll gets "no progress", the same answer
/// an unknown id gets. Only the exact post-snap state is reclaimed: a final
/// encoder report can read as 100% while the commit is still pending, and
/// deleting the record then would destroy the job. The delete races freely
/// with the ingestion endpoint's own reclamation, which is safe because
/// deletion is idempotent.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<ProgressResponse>> {
    let id = parse_id(video_id)?;

    let job = state
        .progress
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No progress for video: \"{id}\"")))?;

    let percent = job.percent();
    if job.is_complete() {
        state.progress.delete(&id).await?;
    }

    Ok(Json(ProgressResponse { progress: percent }))
}

/// Ingest the encoder's progress stream.
///
/// ffmpeg reports the whole encode in one long-lived chunked POST of
/// newline-terminated `key=value` lines. Only the encoder itself may call
/// this, enforced before any of the body is read. Each elapsed-time line
/// updates the stored job; a blank line or the end marker closes the loop,
/// which is the authoritative completion signal: the video is finalized and
/// the stored progress snapped to exactly the probed duration.
pub async fn set_progress(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Body,
) -> ApiResult<&'static str> {
    ensure_loopback(peer, &headers)?;

    let id = parse_id(video_id)?;

    // A callback for a job we know nothing about is an unrecoverable
    // inconsistency; discard whatever is on disk and refuse the stream.
    let Some(mut job) = state.progress.get(&id).await? else {
        warn!(video_id = %id, "Progress callback for unknown job");
        pipeline::cleanup(&state, &id).await;
        return Err(ApiError::bad_request("No transcode job for this video"));
    };

    let stream = body.into_data_stream().map_err(io::Error::other);
    let mut lines = StreamReader::new(stream).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ApiError::internal(format!("Progress stream failed: {e}")))?
    {
        let line = line.trim();
        if line.is_empty() || line == END_MARKER {
            break;
        }

        if let Some(value) = line.strip_prefix(OUT_TIME_PREFIX) {
            if let Ok(microseconds) = value.parse::<f64>() {
                job.progress = microseconds / 1_000_000.0;
                state.progress.put(&id, &job).await?;
            }
        }
    }

    match pipeline::finalize(&state, &id, &job).await {
        Ok(()) => {
            job.snap_complete();
            state.progress.put(&id, &job).await?;
            info!(video_id = %id, "Transcode complete");
        }
        Err(e) => {
            // Nothing the encoder can do about this; the uploader observes
            // the failure through the reclaimed job on their next poll.
            warn!(video_id = %id, error = %e, "Finalize failed after encode");
        }
    }

    Ok("OK")
}
