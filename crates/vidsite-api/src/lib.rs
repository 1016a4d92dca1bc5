//! Axum HTTP server for the vidsite upload/transcode pipeline.
//!
//! This crate provides:
//! - The multipart upload endpoint and its validation/dispatch flow
//! - The loopback-only progress ingestion callback the encoder reports to
//! - Caller-facing progress polling and video listing
//! - Static serving of encoded artifacts

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
