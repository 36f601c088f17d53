use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Transcode a downloaded container into an MP3 in `output`, keeping only
/// the audio stream at the encoder's highest variable bitrate.
pub fn transcode_to_mp3(input: &Path, output: &Path) -> Result<()> {
    let status = Command::new("ffmpeg")
        .arg("-i")
        .arg(input)
        .args(["-q:a", "0", "-map", "a", "-y"])
        .arg(output)
        .status()
        .context("failed to spawn ffmpeg. Is it installed?")?;

    if !status.success() {
        // Clean up the partial output file if it exists
        let _ = std::fs::remove_file(output);
        bail!("ffmpeg failed for {}", input.display());
    }

    Ok(())
}
