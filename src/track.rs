use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::converter;
use crate::downloader;
use crate::library::{Library, AUDIO_EXT};
use crate::metadata::{self, TrackTags};
use crate::ytdlp;

/// Name of the scratch cover file, reused for every track.
const COVER_FILE: &str = "cover.jpg";

/// Download one track into the library: metadata, dedup check, download,
/// transcode, tag, and final rename. A file already present at the
/// computed path skips everything else — path existence is the whole
/// dedup mechanism.
pub fn acquire(config: &Config, library: &Library, url: &str) -> Result<()> {
    let meta = ytdlp::fetch_metadata(url)
        .with_context(|| format!("fetching metadata for {url}"))?;

    let artist = meta.display_artist();
    let title = meta.display_title();

    let dest = library.track_path(artist, title);
    if dest.exists() {
        println!("Already downloaded: {} — {}", artist, title);
        return Ok(());
    }

    println!("Downloading: {} — {}", artist, title);

    let raw = scratch_path(config, &meta.id, "webm");
    let encoded = scratch_path(config, &meta.id, AUDIO_EXT);

    downloader::download_audio(url, &raw).with_context(|| format!("downloading {url}"))?;
    converter::transcode_to_mp3(&raw, &encoded)
        .with_context(|| format!("transcoding {url}"))?;
    fs::remove_file(&raw).with_context(|| format!("removing {}", raw.display()))?;

    let cover_file = config.work_dir.join(COVER_FILE);
    let cover = match meta.thumbnail.as_deref() {
        Some(thumbnail) => {
            metadata::fetch_cover(thumbnail, &cover_file)
                .with_context(|| format!("fetching cover for {url}"))?;
            Some(cover_file.as_path())
        }
        None => None,
    };

    metadata::write_tags(
        &encoded,
        &TrackTags {
            title,
            artist,
            album: meta.display_album(),
            cover,
        },
    )
    .with_context(|| format!("tagging {url}"))?;

    library.artist_dir(artist)?;
    fs::rename(&encoded, &dest)
        .with_context(|| format!("moving {} into the library", encoded.display()))?;

    if cover_file.exists() {
        let _ = fs::remove_file(&cover_file);
    }

    println!("Saved: {}", dest.display());
    Ok(())
}

fn scratch_path(config: &Config, id: &str, ext: &str) -> PathBuf {
    config.work_dir.join(format!("{id}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_files_are_named_by_track_id() {
        let config = Config {
            music_dir: PathBuf::from("/music"),
            work_dir: PathBuf::from("/scratch"),
            players: Vec::new(),
        };
        assert_eq!(
            scratch_path(&config, "abc123", "webm"),
            PathBuf::from("/scratch/abc123.webm")
        );
        assert_eq!(
            scratch_path(&config, "abc123", AUDIO_EXT),
            PathBuf::from("/scratch/abc123.mp3")
        );
    }
}
