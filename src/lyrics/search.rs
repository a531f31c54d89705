//! Top-result extraction from the chartlyrics `SearchLyricText` response.
//!
//! The response looks like:
//!
//! ```xml
//! <ArrayOfSearchLyricResult xmlns="http://api.chartlyrics.com/">
//!   <SearchLyricResult>
//!     <SongUrl>http://www.chartlyrics.com/mBjZg2N310ewO7khMjdcRw/Brain+Damage.aspx</SongUrl>
//!     <Artist>Pink Floyd</Artist>
//!     <Song>Brain Damage</Song>
//!   </SearchLyricResult>
//!   ...
//! </ArrayOfSearchLyricResult>
//! ```
//!
//! Only the first `SearchLyricResult` is considered.

use std::fmt;

use roxmltree::{Document, Node};

use super::error::Result;

const NAMESPACE: &str = "http://api.chartlyrics.com/";

/// The top match of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub artist: String,
    pub song_title: String,
    /// Opaque locator of the lyrics page.
    pub lyrics_url: String,
}

/// Which part of the top result could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Result,
    SongUrl,
    Artist,
    Song,
}

impl MissingField {
    fn element(self) -> &'static str {
        match self {
            MissingField::Result => "SearchLyricResult",
            MissingField::SongUrl => "SongUrl",
            MissingField::Artist => "Artist",
            MissingField::Song => "Song",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            MissingField::Result => "Search returned no results",
            MissingField::SongUrl => "Could not determine URL of top search result",
            MissingField::Artist => "Could not determine artist of top search result",
            MissingField::Song => "Could not determine song title of top search result",
        };
        f.write_str(what)
    }
}

/// Either a complete top result or the first field that was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopResult {
    Found(SearchResult),
    NotFound(MissingField),
}

/// Extract the top search result from a raw response body.
///
/// Malformed XML is an error; absent fields are not.
pub fn extract_top_result(xml: &str) -> Result<TopResult> {
    let doc = Document::parse(xml)?;

    let Some(top) = first_child(doc.root_element(), MissingField::Result) else {
        return Ok(not_found(MissingField::Result));
    };

    match read_result(top) {
        Ok(result) => Ok(TopResult::Found(result)),
        Err(field) => Ok(not_found(field)),
    }
}

// Lookups run in order and stop at the first missing field.
fn read_result(top: Node<'_, '_>) -> std::result::Result<SearchResult, MissingField> {
    let lyrics_url = child_text(top, MissingField::SongUrl).ok_or(MissingField::SongUrl)?;
    let artist = child_text(top, MissingField::Artist).ok_or(MissingField::Artist)?;
    let song_title = child_text(top, MissingField::Song).ok_or(MissingField::Song)?;
    Ok(SearchResult {
        artist,
        song_title,
        lyrics_url,
    })
}

fn not_found(field: MissingField) -> TopResult {
    tracing::warn!(field = field.element(), "{field}");
    TopResult::NotFound(field)
}

fn first_child<'a, 'input>(
    parent: Node<'a, 'input>,
    field: MissingField,
) -> Option<Node<'a, 'input>> {
    parent
        .children()
        .find(|n| n.has_tag_name((NAMESPACE, field.element())))
}

fn child_text(parent: Node<'_, '_>, field: MissingField) -> Option<String> {
    let text = first_child(parent, field)?.text()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}
