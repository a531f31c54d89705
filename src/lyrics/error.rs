//! Fatal lookup errors.
//!
//! "No result" and "too few lines" are not errors; see [`super::Lookup`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LyricsError>;

#[derive(Debug, Error)]
pub enum LyricsError {
    /// The request never completed (connect, socket or body read failure).
    #[error("could not retrieve {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP error code {} from {url}", .status.as_u16())]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The search response is not well-formed XML.
    #[error("malformed search response: {0}")]
    Parse(#[from] roxmltree::Error),
}
