//! FFmpeg CLI wrapper for the vidsite transcode pipeline.
//!
//! This crate provides:
//! - ffprobe-based validation and duration probing
//! - An ffmpeg command builder with HTTP progress reporting
//! - Detached encode and thumbnail jobs

pub mod command;
pub mod encode;
pub mod error;
pub mod probe;
pub mod thumbnail;

pub use command::FfmpegCommand;
pub use error::{MediaError, MediaResult};
pub use probe::{is_playable_video, probe_media, video_duration, MediaProbe};
