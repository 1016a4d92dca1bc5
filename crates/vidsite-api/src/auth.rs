//! Identity collaborator.
//!
//! Sessions, tokens and user records live in a separate service; this module
//! only maps an opaque caller token to a stable integer owner id through the
//! [`IdentityProvider`] port.

use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Resolves an opaque caller token to an owner id.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `None` means the token is unknown or expired.
    async fn owner_id(&self, token: &str) -> ApiResult<Option<i64>>;
}

/// HTTP client for the external session service.
pub struct SessionService {
    base_url: String,
    http: reqwest::Client,
}

impl SessionService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct SessionResponse {
    user: SessionUser,
}

#[derive(Deserialize)]
struct SessionUser {
    uid: i64,
}

#[async_trait]
impl IdentityProvider for SessionService {
    async fn owner_id(&self, token: &str) -> ApiResult<Option<i64>> {
        let response = self
            .http
            .get(format!("{}/api/getsession", self.base_url))
            .header(AUTHORIZATION, token)
            .send()
            .await
            .map_err(|e| ApiError::internal(format!("Session service unreachable: {e}")))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ApiError::internal(format!(
                "Session service returned {}",
                response.status()
            )));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::internal(format!("Bad session response: {e}")))?;

        Ok(Some(session.user.uid))
    }
}

/// Guard composed ahead of authenticated handlers: resolve the caller's owner
/// id or reject with a typed 401.
pub async fn require_owner(state: &AppState, headers: &HeaderMap) -> ApiResult<i64> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    state
        .identity
        .owner_id(token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid session"))
}
