use std::path::PathBuf;

/// Runtime configuration threaded through every command.
///
/// Built once in `main` so tests can point the library root at a
/// temporary directory and swap the player list for a stub command.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the music library (one subdirectory per artist).
    pub music_dir: PathBuf,
    /// Scratch directory for download/transcode intermediates.
    pub work_dir: PathBuf,
    /// Playback backends, tried in order until one spawns.
    pub players: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let music_dir = dirs::audio_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Music")
        });
        // Intermediates stay on the same filesystem as the invocation so the
        // final rename into the library does not cross a mount point.
        let work_dir = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());

        Self {
            music_dir,
            work_dir,
            players: ["mpv", "mplayer", "mpg123", "afplay", "ffplay"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}
