//! FFprobe media inspection.

use std::path::Path;
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Parsed ffprobe output for an uploaded file.
#[derive(Debug, Clone)]
pub struct MediaProbe {
    streams: Vec<ProbeStream>,
    format_duration: Option<f64>,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

impl MediaProbe {
    /// True if the file contains at least one video stream.
    pub fn has_video_stream(&self) -> bool {
        self.streams
            .iter()
            .any(|s| s.codec_type.as_deref() == Some("video"))
    }

    /// Duration of the first video stream in seconds.
    ///
    /// Some containers (mkv among others) do not expose a per-stream duration,
    /// so this falls back to the container-level format duration.
    pub fn duration(&self) -> Option<f64> {
        let stream_duration = self
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .and_then(|s| s.duration.as_deref())
            .and_then(|d| d.parse::<f64>().ok());

        stream_duration.or(self.format_duration)
    }
}

/// Probe a file with ffprobe.
///
/// A non-zero ffprobe exit means the tool could not process the file at all;
/// that is reported as [`MediaError::NotAVideo`] so callers never confuse a
/// garbage upload with a system error.
pub async fn probe_media(path: impl AsRef<Path>) -> MediaResult<MediaProbe> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::NotAVideo(path.to_path_buf()));
    }

    let probe: ProbeOutput = serde_json::from_slice(&output.stdout)
        .map_err(|_| MediaError::NotAVideo(path.to_path_buf()))?;

    Ok(MediaProbe {
        streams: probe.streams,
        format_duration: probe
            .format
            .and_then(|f| f.duration)
            .and_then(|d| d.parse::<f64>().ok()),
    })
}

/// Check whether a file contains a playable video stream.
///
/// Any probe failure counts as "not a video" here; this runs before a
/// transcode is dispatched so compute is never wasted on bad uploads.
pub async fn is_playable_video(path: impl AsRef<Path>) -> bool {
    match probe_media(path).await {
        Ok(probe) => probe.has_video_stream(),
        Err(_) => false,
    }
}

/// Get the duration of a video file in seconds.
pub async fn video_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();
    let probe = probe_media(path).await?;
    probe
        .duration()
        .ok_or_else(|| MediaError::NotAVideo(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_from_json(json: &str) -> MediaProbe {
        let parsed: ProbeOutput = serde_json::from_str(json).unwrap();
        MediaProbe {
            streams: parsed.streams,
            format_duration: parsed
                .format
                .and_then(|f| f.duration)
                .and_then(|d| d.parse::<f64>().ok()),
        }
    }

    #[test]
    fn test_video_stream_detected() {
        let probe = probe_from_json(
            r#"{"streams":[{"codec_type":"audio"},{"codec_type":"video","duration":"10.000000"}],
                "format":{"duration":"10.024000"}}"#,
        );
        assert!(probe.has_video_stream());
        assert_eq!(probe.duration(), Some(10.0));
    }

    #[test]
    fn test_audio_only_rejected() {
        let probe = probe_from_json(
            r#"{"streams":[{"codec_type":"audio","duration":"42.0"}],"format":{"duration":"42.0"}}"#,
        );
        assert!(!probe.has_video_stream());
    }

    #[test]
    fn test_format_duration_fallback() {
        // mkv-style output: the video stream carries no duration field
        let probe = probe_from_json(
            r#"{"streams":[{"codec_type":"video"}],"format":{"duration":"12.345000"}}"#,
        );
        assert!(probe.has_video_stream());
        assert_eq!(probe.duration(), Some(12.345));
    }

    #[test]
    fn test_no_duration_anywhere() {
        let probe = probe_from_json(r#"{"streams":[{"codec_type":"video"}]}"#);
        assert_eq!(probe.duration(), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_playable() {
        assert!(!is_playable_video("/nonexistent/clip.mp4").await);
    }
}
