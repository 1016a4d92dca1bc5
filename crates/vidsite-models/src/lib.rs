//! Shared data models for the vidsite backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video identifiers and their generation alphabet
//! - In-flight transcode jobs
//! - Persisted video catalog rows
//! - Encoding and artifact layout constants

pub mod encoding;
pub mod id;
pub mod job;
pub mod video;

// Re-export common types
pub use id::VideoId;
pub use job::TranscodeJob;
pub use video::{VideoRecord, VideoSummary};
