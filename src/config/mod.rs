use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::lyrics::ChartLyricsClient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the chartlyrics `apiv1.asmx` endpoint.
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ChartLyricsClient::DEFAULT_BASE_URL.to_string(),
            user_agent: ChartLyricsClient::USER_AGENT.to_string(),
            timeout_secs: ChartLyricsClient::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client(&self) -> anyhow::Result<ChartLyricsClient> {
        ChartLyricsClient::new(&self.base_url, &self.user_agent, self.timeout())
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from("com", "chartlyrics-fetch", "chartlyrics-fetch")
        .context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!("no config directory ({e:#}), using defaults");
                return Ok(Config::default());
            }
        },
    };

    if !path.exists() {
        // An explicit path must exist.
        if override_path.is_some() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse(&raw).with_context(|| format!("parse {}", path.display()))
}

fn parse(raw: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str::<Config>(raw)?)
}
