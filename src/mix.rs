use anyhow::{Context, Result};
use url::Url;

use crate::ytdlp;

/// Titles that mark an auto-generated collection on the major platforms.
const MIX_KEYWORDS: &[&str] = &[
    "mix",
    "radio",
    "station",
    "my mix",
    "your mix",
    "daily mix",
    "discover weekly",
    "release radar",
];

/// Classify a playlist URL as an auto-generated mix/radio collection.
///
/// The URL check short-circuits without touching the network. When it is
/// inconclusive, the playlist title of the first entry is probed with a
/// bounded timeout; a failed probe is logged and treated as "not a mix".
/// An error returned from here (an unparseable URL) is handled by the
/// caller, which treats the playlist as a mix.
pub fn is_mix(playlist_url: &str) -> Result<bool> {
    let parsed = Url::parse(playlist_url)
        .with_context(|| format!("unparseable playlist URL {playlist_url}"))?;

    if let Some(list_id) = playlist_id(&parsed) {
        if list_id.starts_with("RD") || list_id == "LM" {
            return Ok(true);
        }
    }

    match ytdlp::probe_playlist_title(playlist_url) {
        Ok(Some(title)) => {
            let title = title.to_lowercase();
            Ok(MIX_KEYWORDS.iter().any(|kw| title.contains(kw)))
        }
        Ok(None) => Ok(false),
        Err(err) => {
            eprintln!("[WARN] could not inspect playlist title ({err}); assuming it is not a mix");
            Ok(false)
        }
    }
}

/// Value of the `list` query parameter, when present.
fn playlist_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(url: &str) -> Option<String> {
        playlist_id(&Url::parse(url).unwrap())
    }

    #[test]
    fn extracts_list_parameter() {
        assert_eq!(
            id_of("https://www.youtube.com/watch?v=abc&list=PL123"),
            Some("PL123".to_string())
        );
        assert_eq!(
            id_of("https://www.youtube.com/playlist?list=RDabcdef"),
            Some("RDabcdef".to_string())
        );
        assert_eq!(id_of("https://www.youtube.com/watch?v=abc"), None);
    }

    #[test]
    fn radio_and_liked_music_ids_are_mixes_without_probing() {
        // These must short-circuit on the URL alone; a probe would try to
        // spawn the extractor, which the test environment does not have.
        assert!(is_mix("https://www.youtube.com/playlist?list=RDabcdef").unwrap());
        assert!(is_mix("https://www.youtube.com/watch?v=abc&list=RDMMxyz").unwrap());
        assert!(is_mix("https://www.youtube.com/playlist?list=LM").unwrap());
    }

    #[test]
    fn ordinary_playlist_id_is_not_flagged_by_the_url_check() {
        let url = Url::parse("https://www.youtube.com/playlist?list=PLuser123").unwrap();
        let id = playlist_id(&url).unwrap();
        assert!(!id.starts_with("RD"));
        assert_ne!(id, "LM");
    }

    #[test]
    fn malformed_url_is_an_error_for_the_caller_to_fail_closed_on() {
        assert!(is_mix("not a url at all").is_err());
    }
}
