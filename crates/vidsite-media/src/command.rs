//! FFmpeg command builder.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Builder for ffmpeg invocations.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Progress reporting target URL, if any
    progress_url: Option<String>,
    /// Whether to overwrite output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new ffmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            progress_url: None,
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add an output argument (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Stream machine-readable progress lines to a URL. ffmpeg performs a
    /// single chunked POST of `key=value` lines for the whole encode.
    pub fn progress_url(mut self, url: impl Into<String>) -> Self {
        self.progress_url = Some(url.into());
        self
    }

    /// Cap the output bitrate.
    pub fn maxrate(self, rate: impl Into<String>) -> Self {
        self.output_arg("-maxrate").output_arg(rate)
    }

    /// Place the moov atom at the front of the file for progressive playback.
    pub fn faststart(self) -> Self {
        self.output_arg("-movflags").output_arg("+faststart")
    }

    /// Set a video filter.
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    /// Set the output frame size (WxH).
    pub fn frame_size(self, size: impl Into<String>) -> Self {
        self.output_arg("-s").output_arg(size)
    }

    /// Extract a single frame.
    pub fn single_frame(self) -> Self {
        self.output_arg("-frames:v").output_arg("1")
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push(self.log_level.clone());

        if let Some(url) = &self.progress_url {
            args.push("-progress".to_string());
            args.push(url.clone());
        }

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }

    /// Spawn the encode as a detached child. The child keeps running when the
    /// handle is dropped; only the launch itself can fail here.
    pub fn spawn_detached(&self) -> MediaResult<Child> {
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let args = self.build_args();
        debug!(args = ?args, "Spawning ffmpeg");

        let child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false)
            .spawn()?;

        Ok(child)
    }

    /// Run the command to completion.
    pub async fn run(&self) -> MediaResult<()> {
        let mut child = self.spawn_detached()?;
        let status = child.wait().await?;

        if !status.success() {
            return Err(MediaError::EncodeFailed(status.code().unwrap_or(-1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_order() {
        let cmd = FfmpegCommand::new("in.mov", "out.mp4")
            .progress_url("http://127.0.0.1:5000/api/setprogress/abcde")
            .maxrate("1500k")
            .faststart();

        let args = cmd.build_args();
        assert_eq!(args[0], "-y");

        let progress_pos = args.iter().position(|a| a == "-progress").unwrap();
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert!(progress_pos < input_pos, "progress target precedes input");
        assert_eq!(args[progress_pos + 1], "http://127.0.0.1:5000/api/setprogress/abcde");

        assert_eq!(args.last().unwrap(), "out.mp4");
        assert!(args.windows(2).any(|w| w[0] == "-maxrate" && w[1] == "1500k"));
        assert!(args.windows(2).any(|w| w[0] == "-movflags" && w[1] == "+faststart"));
    }

    #[test]
    fn test_thumbnail_args() {
        let cmd = FfmpegCommand::new("in.mp4", "thumb.png")
            .video_filter("thumbnail")
            .frame_size("376x222")
            .single_frame();

        let args = cmd.build_args();
        assert!(args.windows(2).any(|w| w[0] == "-vf" && w[1] == "thumbnail"));
        assert!(args.windows(2).any(|w| w[0] == "-s" && w[1] == "376x222"));
        assert!(args.windows(2).any(|w| w[0] == "-frames:v" && w[1] == "1"));
        assert!(!args.contains(&"-progress".to_string()));
    }
}
