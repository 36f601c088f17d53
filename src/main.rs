mod cli;
mod config;
mod converter;
mod downloader;
mod library;
mod metadata;
mod mix;
mod player;
mod playlist;
mod track;
mod ytdlp;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::library::Library;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::from_env();
    let library = Library::open(&config)?;

    match command {
        Commands::Song { url } => track::acquire(&config, &library, &url),
        Commands::Playlist { url } => playlist::acquire(&config, &library, &url),
        Commands::Play { random, artist } => {
            player::play(&config, &library, random, artist.as_deref())
        }
    }
}
