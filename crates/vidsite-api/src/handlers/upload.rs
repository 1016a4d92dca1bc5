//! Multipart video upload.

use std::io;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::{BoxError, Json};
use futures::{Stream, TryStreamExt};
use serde::Serialize;
use tokio::fs::File;
use tokio::io::BufWriter;
use tokio_util::io::StreamReader;
use tracing::info;

use vidsite_media::is_playable_video;
use vidsite_models::encoding::ORIGINAL_FILE_STEM;
use vidsite_models::VideoId;
use vidsite_store::allocate_id;

use crate::auth::require_owner;
use crate::error::{ApiError, ApiResult};
use crate::services::pipeline;
use crate::state::AppState;

/// Upload reply: the handle the caller polls progress with.
#[derive(Serialize)]
pub struct UploadResponse {
    pub video_id: VideoId,
    pub duration: f64,
}

/// Accept a multipart upload, validate it and dispatch the transcode.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let owner = require_owner(&state, &headers).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        return accept_file(&state, owner, field).await;
    }

    Err(ApiError::bad_request("Missing file in upload"))
}

/// Store the uploaded file, validate it and hand it to the dispatcher.
///
/// Transcoding matters here beyond saving space: the served file is generated
/// on the server, which strips any trickery hiding in the upload's metadata.
async fn accept_file(
    state: &AppState,
    owner: i64,
    field: Field<'_>,
) -> ApiResult<Json<UploadResponse>> {
    let file_name = match field.file_name() {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => return Err(ApiError::bad_request("Cannot accept unnamed file")),
    };

    let video_id = allocate_id(state.catalog.as_ref()).await?;
    let dir = pipeline::video_dir(state, &video_id);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::internal(format!("Could not create video directory: {e}")))?;

    let source = dir.join(stored_original_name(state, &file_name));

    if let Err(e) = stream_to_file(&source, field).await {
        pipeline::cleanup(state, &video_id).await;
        return Err(e);
    }

    if !is_playable_video(&source).await {
        pipeline::cleanup(state, &video_id).await;
        return Err(ApiError::InvalidVideo);
    }

    let job = match pipeline::dispatch(state, &video_id, &source, owner, &file_name).await {
        Ok(job) => job,
        Err(e) => {
            pipeline::cleanup(state, &video_id).await;
            return Err(e);
        }
    };

    info!(video_id = %video_id, owner, duration = job.duration, "Upload accepted");
    Ok(Json(UploadResponse {
        video_id,
        duration: job.duration,
    }))
}

/// Name the stored original. The upload's extension is kept only outside
/// production; once the file has been probed it carries no information, and
/// extensions from untrusted filenames are only accepted when purely
/// alphanumeric.
fn stored_original_name(state: &AppState, file_name: &str) -> String {
    if state.config.is_production() {
        return ORIGINAL_FILE_STEM.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!("{ORIGINAL_FILE_STEM}.{ext}")
        }
        _ => ORIGINAL_FILE_STEM.to_string(),
    }
}

/// Save a byte stream to a file.
async fn stream_to_file<S, E>(path: &Path, stream: S) -> ApiResult<()>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    async {
        let body_with_io_error = stream.map_err(|err| io::Error::other(err.into()));
        let body_reader = StreamReader::new(body_with_io_error);
        futures::pin_mut!(body_reader);

        let mut file = BufWriter::new(File::create(path).await?);
        tokio::io::copy(&mut body_reader, &mut file).await?;

        Ok::<_, io::Error>(())
    }
    .await
    .map_err(|e| ApiError::internal(format!("Could not store upload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_env(environment: &str) -> AppState {
        use crate::config::ApiConfig;
        use std::sync::Arc;
        use vidsite_store::MemoryProgressStore;

        struct NoIdentity;
        #[async_trait::async_trait]
        impl crate::auth::IdentityProvider for NoIdentity {
            async fn owner_id(&self, _token: &str) -> ApiResult<Option<i64>> {
                Ok(None)
            }
        }

        struct NoCatalog;
        #[async_trait::async_trait]
        impl vidsite_store::VideoCatalog for NoCatalog {
            async fn insert(
                &self,
                _record: &vidsite_models::VideoRecord,
            ) -> vidsite_store::StoreResult<()> {
                Ok(())
            }
            async fn exists(&self, _id: &VideoId) -> vidsite_store::StoreResult<bool> {
                Ok(false)
            }
            async fn list(
                &self,
                _owner: i64,
                _limit: i64,
                _offset: i64,
                _public: bool,
            ) -> vidsite_store::StoreResult<Vec<vidsite_models::VideoSummary>> {
                Ok(vec![])
            }
        }

        AppState {
            config: ApiConfig {
                environment: environment.to_string(),
                ..ApiConfig::default()
            },
            progress: Arc::new(MemoryProgressStore::new()),
            catalog: Arc::new(NoCatalog),
            identity: Arc::new(NoIdentity),
        }
    }

    #[test]
    fn test_stored_name_keeps_extension_in_dev() {
        let state = state_with_env("development");
        assert_eq!(stored_original_name(&state, "clip.mov"), "original.mov");
        assert_eq!(stored_original_name(&state, "archive.tar.gz"), "original.gz");
    }

    #[test]
    fn test_stored_name_strips_extension_in_production() {
        let state = state_with_env("production");
        assert_eq!(stored_original_name(&state, "clip.mov"), "original");
    }

    #[test]
    fn test_stored_name_rejects_suspect_extensions() {
        let state = state_with_env("development");
        assert_eq!(stored_original_name(&state, "noext"), "original");
        assert_eq!(stored_original_name(&state, "clip."), "original");
        assert_eq!(stored_original_name(&state, "clip.m/v"), "original");
    }

    #[tokio::test]
    async fn test_stream_to_file_writes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("original.mp4");

        let data: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"hello ")),
            Ok(Bytes::from_static(b"world")),
        ];
        stream_to_file(&path, futures::stream::iter(data))
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
    }
}
