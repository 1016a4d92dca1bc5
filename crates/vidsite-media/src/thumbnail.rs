//! Thumbnail extraction.

use std::path::Path;

use vidsite_models::encoding::THUMBNAIL_LOWRES_SIZE;

use crate::command::FfmpegCommand;
use crate::error::MediaResult;

/// Launch full-size thumbnail extraction as a detached job.
pub fn spawn_thumbnail(input: impl AsRef<Path>, output: impl AsRef<Path>) -> MediaResult<()> {
    let cmd = FfmpegCommand::new(input, output)
        .video_filter("thumbnail")
        .single_frame();
    cmd.spawn_detached()?;
    Ok(())
}

/// Extract a low resolution thumbnail, waiting for completion.
///
/// This is the one blocking step in dispatch; it is a single frame and short.
pub async fn extract_thumbnail_lowres(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    FfmpegCommand::new(input, output)
        .video_filter("thumbnail")
        .frame_size(THUMBNAIL_LOWRES_SIZE)
        .single_frame()
        .run()
        .await
}
