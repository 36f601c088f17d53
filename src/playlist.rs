use anyhow::{Context, Result};

use crate::config::Config;
use crate::library::Library;
use crate::mix;
use crate::track;
use crate::ytdlp;

/// "Start radio" shortcut links expand to an endless mix; they are skipped
/// before any resolution attempt.
const START_RADIO_MARKER: &str = "start_radio";

/// Download every track of a playlist, in playlist order. One failing
/// track is logged and does not stop the rest.
pub fn acquire(config: &Config, library: &Library, url: &str) -> Result<()> {
    if url.contains(START_RADIO_MARKER) {
        println!("Skipping start-radio link: {url}");
        return Ok(());
    }

    match mix::is_mix(url) {
        Ok(true) => {
            println!("Skipping auto-generated mix/radio playlist: {url}");
            return Ok(());
        }
        Ok(false) => {}
        Err(err) => {
            // Unclassifiable playlists count as mixes.
            println!("Could not classify playlist ({err:#}); treating it as a mix: {url}");
            return Ok(());
        }
    }

    let entries =
        ytdlp::playlist_entries(url).with_context(|| format!("resolving playlist {url}"))?;
    println!("Playlist resolved to {} tracks", entries.len());

    for entry in &entries {
        let track_url = ytdlp::watch_url(&entry.id);
        if let Err(err) = track::acquire(config, library, &track_url) {
            eprintln!("[ERROR] {track_url}: {err:#}");
        }
    }

    Ok(())
}
