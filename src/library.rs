use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Every track ends up as an MP3 regardless of the source container.
pub const AUDIO_EXT: &str = "mp3";

const FORBIDDEN: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Sanitize a name so it is safe as a file or directory name.
/// Forbidden characters become underscores; everything else is kept as-is.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect()
}

/// The on-disk music library: `<root>/<artist>/<title>.mp3`.
///
/// The directory listing is the only catalog; a track exists exactly when
/// its computed path does.
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Open the library rooted at the configured music directory,
    /// creating it if needed.
    pub fn open(config: &Config) -> Result<Self> {
        fs::create_dir_all(&config.music_dir).with_context(|| {
            format!("creating music directory {}", config.music_dir.display())
        })?;
        Ok(Self {
            root: config.music_dir.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for one artist, created on demand.
    pub fn artist_dir(&self, artist: &str) -> Result<PathBuf> {
        let dir = self.root.join(sanitize_name(artist));
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating artist directory {}", dir.display()))?;
        Ok(dir)
    }

    /// Final path for a track. Computed only — nothing is created.
    pub fn track_path(&self, artist: &str, title: &str) -> PathBuf {
        self.root
            .join(sanitize_name(artist))
            .join(format!("{}.{}", sanitize_name(title), AUDIO_EXT))
    }

    /// Names of the immediate subdirectories of the root, sorted.
    pub fn artists(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("reading {}", self.root.display()))?;
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Files in one artist's directory, sorted. `None` when the artist
    /// directory does not exist (distinct from an artist with no tracks).
    pub fn tracks_of(&self, artist: &str) -> Result<Option<Vec<PathBuf>>> {
        let dir = self.root.join(sanitize_name(artist));
        if !dir.is_dir() {
            return Ok(None);
        }
        let mut tracks = Vec::new();
        let entries =
            fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))?;
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                tracks.push(entry.path());
            }
        }
        tracks.sort();
        Ok(Some(tracks))
    }
}
