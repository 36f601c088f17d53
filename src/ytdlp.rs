use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Upper bound on the single-entry probe used for mix detection.
/// Every other yt-dlp invocation blocks without a time limit.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata for a single video, as reported by `yt-dlp -j`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackMetadata {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl TrackMetadata {
    /// Music-specific track name when the extractor found one, video title otherwise.
    pub fn display_title(&self) -> &str {
        self.track.as_deref().unwrap_or(&self.title)
    }

    pub fn display_artist(&self) -> &str {
        self.artist
            .as_deref()
            .or(self.uploader.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn display_album(&self) -> &str {
        self.album
            .as_deref()
            .or(self.artist.as_deref())
            .or(self.uploader.as_deref())
            .unwrap_or("YouTube")
    }
}

/// One line of `yt-dlp -j --flat-playlist` output. Only the identifier is
/// needed; full metadata is fetched per track at download time.
#[derive(Debug, Deserialize)]
pub struct PlaylistEntry {
    pub id: String,
}

#[derive(Deserialize)]
struct ProbeEntry {
    playlist_title: Option<String>,
}

/// Canonical watch URL for a video identifier.
pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Fetch full metadata for a single track URL via `yt-dlp -j`.
pub fn fetch_metadata(url: &str) -> Result<TrackMetadata> {
    let output = Command::new("yt-dlp")
        .args(["-j", url])
        .output()
        .context("failed to run yt-dlp. Is it installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("yt-dlp failed for {url}: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).context("parsing yt-dlp metadata output")
}

/// Resolve a playlist to its entries via `yt-dlp -j --flat-playlist`
/// (one JSON object per line, in playlist order). Lines that do not
/// parse are skipped, like unavailable videos.
pub fn playlist_entries(url: &str) -> Result<Vec<PlaylistEntry>> {
    let output = Command::new("yt-dlp")
        .args(["-j", "--flat-playlist", url])
        .output()
        .context("failed to run yt-dlp. Is it installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("yt-dlp failed for playlist {url}: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut entries = Vec::new();
    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(entry) = serde_json::from_str::<PlaylistEntry>(line) {
            entries.push(entry);
        }
    }

    if entries.is_empty() {
        bail!("no tracks found in playlist {url}. Is the URL correct?");
    }

    Ok(entries)
}

/// Best-effort title of the playlist a URL belongs to, read from its first
/// entry with `--playlist-items 1` under `PROBE_TIMEOUT`. Returns `Ok(None)`
/// when the entry carries no playlist title.
pub fn probe_playlist_title(url: &str) -> Result<Option<String>> {
    let child = Command::new("yt-dlp")
        .args(["-j", "--flat-playlist", "--playlist-items", "1", url])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .context("failed to run yt-dlp. Is it installed?")?;

    let output = wait_with_output_timeout(child, PROBE_TIMEOUT)?;
    if !output.status.success() {
        bail!("yt-dlp probe failed for {url}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = match stdout.lines().find(|l| !l.trim().is_empty()) {
        Some(line) => line,
        None => return Ok(None),
    };
    let entry: ProbeEntry =
        serde_json::from_str(first).context("parsing yt-dlp probe output")?;
    Ok(entry.playlist_title)
}

/// Wait for a child with a deadline, killing and reaping it on timeout.
fn wait_with_output_timeout(mut child: Child, timeout: Duration) -> Result<Output> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait().context("waiting for yt-dlp")? {
            Some(_) => return child.wait_with_output().context("collecting yt-dlp output"),
            None => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    bail!("yt-dlp timed out after {}s", timeout.as_secs());
                }
                std::thread::sleep(Duration::from_millis(100));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(json: &str) -> TrackMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_full_metadata_record() {
        let m = meta(
            r#"{"id":"abc123","title":"Song One (Official Video)","track":"Song One",
                "artist":"Some Band","uploader":"SomeBandVEVO","album":"First Album",
                "thumbnail":"https://example.test/thumb.jpg","duration":241}"#,
        );
        assert_eq!(m.id, "abc123");
        assert_eq!(m.display_title(), "Song One");
        assert_eq!(m.display_artist(), "Some Band");
        assert_eq!(m.display_album(), "First Album");
        assert_eq!(m.thumbnail.as_deref(), Some("https://example.test/thumb.jpg"));
    }

    #[test]
    fn title_falls_back_to_video_title() {
        let m = meta(r#"{"id":"x","title":"Plain Upload"}"#);
        assert_eq!(m.display_title(), "Plain Upload");
    }

    #[test]
    fn artist_precedence_is_artist_then_uploader_then_unknown() {
        let m = meta(r#"{"id":"x","title":"t","artist":"A","uploader":"U"}"#);
        assert_eq!(m.display_artist(), "A");

        let m = meta(r#"{"id":"x","title":"t","uploader":"U"}"#);
        assert_eq!(m.display_artist(), "U");

        let m = meta(r#"{"id":"x","title":"t"}"#);
        assert_eq!(m.display_artist(), "Unknown");
    }

    #[test]
    fn album_precedence_ends_at_youtube() {
        let m = meta(r#"{"id":"x","title":"t","uploader":"U"}"#);
        assert_eq!(m.display_album(), "U");

        let m = meta(r#"{"id":"x","title":"t"}"#);
        assert_eq!(m.display_album(), "YouTube");
    }

    #[test]
    fn watch_url_wraps_the_id() {
        assert_eq!(watch_url("abc123"), "https://www.youtube.com/watch?v=abc123");
    }
}
