//! Request gating for the progress ingestion callback.

use std::net::SocketAddr;

use axum::http::HeaderMap;

use crate::error::{ApiError, ApiResult};

/// Headers whose presence means the request crossed a proxy. The encoder
/// talks to this process directly, so a proxied request is never legitimate
/// no matter what peer address it arrives from.
const FORWARDING_HEADERS: &[&str] = &["x-forwarded-for", "x-proxied-for"];

/// Admit only the encoder process itself: the peer must be loopback and the
/// request must not have passed through any intermediary. Runs before a
/// single byte of the body is read.
pub fn ensure_loopback(peer: SocketAddr, headers: &HeaderMap) -> ApiResult<()> {
    if !peer.ip().is_loopback() {
        return Err(ApiError::Forbidden);
    }
    for name in FORWARDING_HEADERS {
        if headers.contains_key(*name) {
            return Err(ApiError::Forbidden);
        }
    }
    Ok(())
}
