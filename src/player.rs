use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Select};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::library::Library;

/// One playable entry, built fresh from the library each time playback starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub path: PathBuf,
    pub display: String,
}

/// Play songs from the library, either shuffled straight through or via an
/// interactive "pick next" loop, optionally restricted to one artist.
pub fn play(config: &Config, library: &Library, random: bool, artist: Option<&str>) -> Result<()> {
    let songs = match collect_songs(library, artist)? {
        Some(songs) => songs,
        None => {
            println!("Artist not found: {}", artist.unwrap_or_default());
            return Ok(());
        }
    };

    if songs.is_empty() {
        println!("No songs found.");
        return Ok(());
    }

    if random {
        play_shuffled(config, songs, &mut rand::thread_rng())
    } else {
        play_interactive(config, songs)
    }
}

/// Candidate songs, across the whole library or one artist's directory.
/// `None` means the requested artist directory does not exist.
fn collect_songs(library: &Library, artist: Option<&str>) -> Result<Option<Vec<Song>>> {
    let mut songs = Vec::new();
    match artist {
        Some(name) => match library.tracks_of(name)? {
            Some(tracks) => songs.extend(tracks.into_iter().map(|p| song_entry(name, p))),
            None => return Ok(None),
        },
        None => {
            for name in library.artists()? {
                if let Some(tracks) = library.tracks_of(&name)? {
                    songs.extend(tracks.into_iter().map(|p| song_entry(&name, p)));
                }
            }
        }
    }
    Ok(Some(songs))
}

fn song_entry(artist: &str, path: PathBuf) -> Song {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Song {
        display: format!("{artist} - {file_name}"),
        path,
    }
}

/// Shuffle the whole candidate list and play it straight through. A track
/// that fails to play is logged and the queue keeps going.
fn play_shuffled(config: &Config, mut songs: Vec<Song>, rng: &mut impl Rng) -> Result<()> {
    songs.shuffle(rng);
    for song in &songs {
        println!("Playing: {}", song.display);
        if let Err(err) = play_file(config, &song.path) {
            eprintln!("[ERROR] playback failed for {}: {err:#}", song.display);
        }
    }
    println!("Played {} songs.", songs.len());
    Ok(())
}

/// Prompt for one song at a time; each pick is played to completion and
/// removed from the remaining set, until it drains or the user exits.
fn play_interactive(config: &Config, mut remaining: Vec<Song>) -> Result<()> {
    loop {
        let names: Vec<&str> = remaining.iter().map(|s| s.display.as_str()).collect();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose a song")
            .items(&names)
            .default(0)
            .interact()
            .context("reading song selection")?;

        let song = remaining.remove(choice);
        println!("Playing: {}", song.display);
        if let Err(err) = play_file(config, &song.path) {
            eprintln!("[ERROR] playback failed for {}: {err:#}", song.display);
        }

        if remaining.is_empty() {
            println!("No songs left.");
            return Ok(());
        }

        let next = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Keep going?")
            .items(&["Play another", "Exit"])
            .default(0)
            .interact()
            .context("reading continue selection")?;
        if next == 1 {
            return Ok(());
        }
    }
}

/// Play one file with the first backend that spawns, blocking until the
/// player exits. Termination by signal counts as completion — a player
/// killed mid-song does not fail the queue.
fn play_file(config: &Config, path: &Path) -> Result<()> {
    for player in &config.players {
        match Command::new(player).arg(path).status() {
            Ok(status) => {
                return match status.code() {
                    Some(0) | None => Ok(()),
                    Some(code) => bail!("{player} exited with status {code}"),
                };
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(err).with_context(|| format!("failed to spawn {player}"));
            }
        }
    }
    bail!(
        "no usable audio player found (tried: {})",
        config.players.join(", ")
    )
}
