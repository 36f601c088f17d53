use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jukebox")]
#[command(version = "0.1.0")]
#[command(about = "Download music from YouTube into a local library and play it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a single track into the library
    #[command(long_flag = "song")]
    Song { url: String },

    /// Download every track of a playlist (auto-generated mixes are rejected)
    #[command(long_flag = "playlist")]
    Playlist { url: String },

    /// Play songs from the library
    #[command(long_flag = "play")]
    Play {
        /// Shuffle all candidates and play them straight through
        #[arg(long)]
        random: bool,

        /// Restrict playback to one artist's directory
        #[arg(long)]
        artist: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn parses_song_mode() {
        let cli = parse(&["jukebox", "--song", "https://example.test/watch?v=abc123"]);
        match cli.command {
            Some(Commands::Song { url }) => {
                assert_eq!(url, "https://example.test/watch?v=abc123");
            }
            _ => panic!("expected song mode"),
        }
    }

    #[test]
    fn parses_playlist_mode() {
        let cli = parse(&["jukebox", "--playlist", "https://example.test/playlist?list=PL1"]);
        assert!(matches!(cli.command, Some(Commands::Playlist { .. })));
    }

    #[test]
    fn play_flags_combine_in_any_order() {
        let cli = parse(&["jukebox", "--play", "--artist", "Ghost", "--random"]);
        match cli.command {
            Some(Commands::Play { random, artist }) => {
                assert!(random);
                assert_eq!(artist.as_deref(), Some("Ghost"));
            }
            _ => panic!("expected play mode"),
        }

        let cli = parse(&["jukebox", "--play", "--random", "--artist", "Ghost"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Play { random: true, .. })
        ));
    }

    #[test]
    fn play_defaults_to_interactive_whole_library() {
        let cli = parse(&["jukebox", "--play"]);
        match cli.command {
            Some(Commands::Play { random, artist }) => {
                assert!(!random);
                assert!(artist.is_none());
            }
            _ => panic!("expected play mode"),
        }
    }

    #[test]
    fn no_arguments_parses_to_no_command() {
        let cli = parse(&["jukebox"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["jukebox", "--frobnicate"]).is_err());
    }
}
