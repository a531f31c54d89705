//! chartlyrics.com API client
//!
//! Search: `GET {base}/SearchLyricText?lyricText=...` returns an XML list of
//! matches. Each match carries a `SongUrl` pointing at an HTML lyrics page.

use std::time::Duration;

use anyhow::Context;

use super::Fetch;
use super::error::{LyricsError, Result};

/// HTTP client for the chartlyrics API.
#[derive(Debug, Clone)]
pub struct ChartLyricsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChartLyricsClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://api.chartlyrics.com/apiv1.asmx";
    pub const USER_AGENT: &'static str = concat!("chartlyrics-fetch/", env!("CARGO_PKG_VERSION"));
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Create a client against `base_url`.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Fetch for ChartLyricsClient {
    fn search_url(&self, term: &str) -> String {
        format!(
            "{}/SearchLyricText?lyricText={}",
            self.base_url,
            urlencoding::encode(term)
        )
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(%url, "fetching");

        let transport = |source| LyricsError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LyricsError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(transport)
    }
}
