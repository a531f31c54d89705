//! Lyrics lookup against chartlyrics.com
//!
//! This module provides:
//! - chartlyrics API client for fetching search results and lyrics pages
//! - Top-result extraction from the XML search response
//! - Line scanner recovering lyric text from the HTML lyrics page
//! - Minimum line count validation

pub mod chartlyrics;
pub mod error;
pub mod scanner;
pub mod search;
pub mod validate;

use std::fmt;
use std::future::Future;

use serde::Serialize;

pub use chartlyrics::ChartLyricsClient;
pub use error::LyricsError;
pub use scanner::ScannedLyrics;
pub use search::{MissingField, TopResult, extract_top_result};
pub use validate::{Rejection, Validation, validate};

/// Source of raw documents for the lookup.
pub trait Fetch {
    /// URL of the search request for `term`.
    fn search_url(&self, term: &str) -> String;

    /// Fetch the body at `url` as text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, LyricsError>> + Send;
}

/// Lyrics ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricsPayload {
    pub artist: String,
    pub song_title: String,
    pub lyrics: String,
}

impl fmt::Display for LyricsPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Artist: {}\nSong: {}.\n{}",
            self.artist, self.song_title, self.lyrics
        )
    }
}

/// Non-fatal outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(LyricsPayload),
    /// The search had no usable top result; the lyrics page was never fetched.
    NoResult(MissingField),
    /// The lyrics page had fewer lines than required.
    Rejected(Rejection),
}

/// Search for `term`, fetch the top result's lyrics page and scan it.
pub async fn fetch_lyrics<F: Fetch>(
    fetcher: &F,
    term: &str,
    min_lines: usize,
) -> error::Result<Lookup> {
    let search_xml = fetcher.fetch(&fetcher.search_url(term)).await?;

    let top = match extract_top_result(&search_xml)? {
        TopResult::Found(top) => top,
        TopResult::NotFound(missing) => return Ok(Lookup::NoResult(missing)),
    };

    let html = fetcher.fetch(&top.lyrics_url).await?;
    let scanned = ScannedLyrics::scan(&html);

    match validate(&scanned, min_lines) {
        Validation::Accepted => {
            tracing::info!(
                artist = %top.artist,
                song = %top.song_title,
                lines = scanned.line_count,
                "lyrics found"
            );
            Ok(Lookup::Found(LyricsPayload {
                artist: top.artist,
                song_title: top.song_title,
                lyrics: scanned.text,
            }))
        }
        Validation::Rejected(rejection) => Ok(Lookup::Rejected(rejection)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const SEARCH_URL: &str = "mem://search";
    const LYRICS_URL: &str = "mem://brain-damage";

    /// Serves canned bodies and records every requested URL.
    #[derive(Default)]
    struct MemoryFetch {
        bodies: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MemoryFetch {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl Fetch for MemoryFetch {
        fn search_url(&self, term: &str) -> String {
            format!("{SEARCH_URL}?{}", urlencoding::encode(term))
        }

        async fn fetch(&self, url: &str) -> error::Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            let key = url.split('?').next().unwrap_or(url);
            self.bodies
                .get(key)
                .cloned()
                .ok_or_else(|| LyricsError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::NOT_FOUND,
                })
        }
    }

    fn search_body(fields: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<ArrayOfSearchLyricResult xmlns="http://api.chartlyrics.com/">
  <SearchLyricResult>{fields}</SearchLyricResult>
</ArrayOfSearchLyricResult>"#
        )
    }

    fn brain_damage_search() -> String {
        search_body(&format!(
            "<SongUrl>{LYRICS_URL}</SongUrl><Artist>Pink Floyd</Artist><Song>Brain Damage</Song>"
        ))
    }

    const LYRICS_PAGE: &str = r#"<p>
<img src="cover.jpg"
alt="" title="Brain Damage" />
The lunatic is on the grass<br />
The lunatic is on the grass<br />
Remembering games and daisy chains and laughs<br />
</p>"#;

    #[tokio::test]
    async fn test_found() {
        let fetcher = MemoryFetch::default()
            .with(SEARCH_URL, &brain_damage_search())
            .with(LYRICS_URL, LYRICS_PAGE);

        let lookup = fetch_lyrics(&fetcher, "lunatic grass", 3).await.unwrap();
        let payload = match lookup {
            Lookup::Found(payload) => payload,
            other => panic!("expected lyrics, got {other:?}"),
        };
        assert_eq!(payload.artist, "Pink Floyd");
        assert_eq!(payload.song_title, "Brain Damage");
        assert_eq!(payload.lyrics.lines().count(), 3);
        assert!(payload.to_string().starts_with(
            "Artist: Pink Floyd\nSong: Brain Damage.\nThe lunatic is on the grass\n"
        ));
        assert_eq!(
            fetcher.requested(),
            vec!["mem://search?lunatic%20grass".to_string(), LYRICS_URL.to_string()]
        );
    }

    #[tokio::test]
    async fn test_no_result_skips_lyrics_fetch() {
        let fetcher = MemoryFetch::default().with(
            SEARCH_URL,
            r#"<ArrayOfSearchLyricResult xmlns="http://api.chartlyrics.com/" />"#,
        );

        let lookup = fetch_lyrics(&fetcher, "nothing", 1).await.unwrap();
        assert_eq!(lookup, Lookup::NoResult(MissingField::Result));
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_result_is_no_result() {
        let fetcher = MemoryFetch::default().with(
            SEARCH_URL,
            &search_body(&format!("<SongUrl>{LYRICS_URL}</SongUrl><Artist>Pink Floyd</Artist>")),
        );

        let lookup = fetch_lyrics(&fetcher, "x", 0).await.unwrap();
        assert_eq!(lookup, Lookup::NoResult(MissingField::Song));
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_too_few_lines_rejected() {
        let fetcher = MemoryFetch::default()
            .with(SEARCH_URL, &brain_damage_search())
            .with(LYRICS_URL, LYRICS_PAGE);

        let lookup = fetch_lyrics(&fetcher, "x", 50).await.unwrap();
        assert_eq!(
            lookup,
            Lookup::Rejected(Rejection {
                required: 50,
                found: 3
            })
        );
    }

    #[tokio::test]
    async fn test_lyrics_fetch_failure_aborts() {
        let fetcher = MemoryFetch::default().with(SEARCH_URL, &brain_damage_search());

        let err = fetch_lyrics(&fetcher, "x", 0).await.unwrap_err();
        assert!(matches!(err, LyricsError::Status { .. }));
    }

    #[tokio::test]
    async fn test_malformed_search_aborts() {
        let fetcher = MemoryFetch::default().with(SEARCH_URL, "<html><body>oops");

        let err = fetch_lyrics(&fetcher, "x", 0).await.unwrap_err();
        assert!(matches!(err, LyricsError::Parse(_)));
        assert_eq!(fetcher.requested().len(), 1);
    }
}
