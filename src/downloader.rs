use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Download the best available audio stream for `url` into `output`.
/// yt-dlp inherits the terminal so its own progress display stays visible.
pub fn download_audio(url: &str, output: &Path) -> Result<()> {
    let status = Command::new("yt-dlp")
        .args(["-f", "bestaudio", "-o"])
        .arg(output)
        .arg(url)
        .status()
        .context("failed to spawn yt-dlp. Is it installed?")?;

    if !status.success() {
        bail!("yt-dlp failed for {url}");
    }

    Ok(())
}
