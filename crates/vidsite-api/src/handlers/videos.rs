//! Video listing.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use vidsite_models::VideoSummary;

use crate::auth::require_owner;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct VideoListResponse {
    pub base_url: String,
    pub videos: Vec<VideoSummary>,
}

/// Page through committed videos.
///
/// Without the `public` flag this lists the caller's own non-private videos;
/// with it, other users' videos. `limit` and `offset` must parse as integers
/// or the request is rejected per argument.
pub async fn list_videos(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<VideoListResponse>> {
    let owner = require_owner(&state, &headers).await?;

    let limit: i64 = params
        .get("limit")
        .map(String::as_str)
        .unwrap_or("20")
        .parse()
        .map_err(|_| ApiError::bad_request("missing arg limit"))?;

    let offset: i64 = params
        .get("offset")
        .map(String::as_str)
        .unwrap_or("0")
        .parse()
        .map_err(|_| ApiError::bad_request("missing arg offset"))?;

    // Both values are caller controlled and the catalog multiplies them into
    // a row offset; reject combinations that cannot be represented.
    if offset.checked_mul(limit).is_none() {
        return Err(ApiError::bad_request("invalid paging"));
    }

    let public = params.contains_key("public");

    let videos = state.catalog.list(owner, limit, offset, public).await?;

    Ok(Json(VideoListResponse {
        base_url: state.config.base_url.clone(),
        videos,
    }))
}
