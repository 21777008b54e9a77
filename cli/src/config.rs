//! Where the task service lives.
//!
//! The flag (or `TASKS_API_URL`) wins over the `api_url` key of a TOML
//! config file, which wins over the local default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Contents of an optional `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    pub fn resolve(api_url: Option<String>, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };

        let api_url = match (api_url, file.api_url) {
            (Some(url), _) => url,
            (None, Some(url)) => {
                debug!("api url taken from config file");
                url
            }
            (None, None) => DEFAULT_API_URL.to_string(),
        };
        info!(%api_url, "resolved task service");
        Ok(Self { api_url })
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}
