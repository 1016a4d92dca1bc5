//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while probing or encoding.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("File is not a valid video: {0}")]
    NotAVideo(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("FFmpeg exited with status {0}")]
    EncodeFailed(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
