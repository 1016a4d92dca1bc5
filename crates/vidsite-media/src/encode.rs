//! Transcode job launch.

use std::path::Path;

use tracing::info;

use vidsite_models::encoding::OUTPUT_MAXRATE;

use crate::command::FfmpegCommand;
use crate::error::MediaResult;

/// Launch the compression encode as a detached job.
///
/// The encoder streams `key=value` progress lines to `progress_url` over a
/// single chunked POST and is left to run to completion on its own; the
/// returned result only reflects whether the launch succeeded.
pub fn spawn_encode(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    progress_url: &str,
) -> MediaResult<()> {
    let input = input.as_ref();

    let cmd = FfmpegCommand::new(input, output.as_ref())
        .maxrate(OUTPUT_MAXRATE)
        .faststart()
        .progress_url(progress_url);

    cmd.spawn_detached()?;
    info!(input = %input.display(), "Encode dispatched");
    Ok(())
}
