use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings that rarely change between runs. The file is optional; defaults
/// apply when it is absent, and CLI flags always win.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Launchpad team searched by default.
    pub team: String,
    /// Launchpad service environment: "production" or "staging".
    pub environment: String,
    /// Show full bug URLs instead of `LP: #` shortlinks.
    pub full_urls: bool,
    /// Distribution whose task collection is searched.
    pub distribution: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            team: "ubuntu-server".to_string(),
            environment: "production".to_string(),
            full_urls: false,
            distribution: "ubuntu".to_string(),
        }
    }
}

impl Config {
    /// Load from `path` when given, else from the default location when it
    /// exists, else fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lp-triage").join("config.toml"))
    }

    /// Where the cached OAuth access token lives.
    pub fn credentials_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lp-triage").join("credentials.toml"))
    }

    /// `(web root, API root)` for the configured environment. The web root
    /// hosts the OAuth endpoints, the API root the versioned collections.
    pub fn service_roots(&self) -> Result<(String, String)> {
        match self.environment.as_str() {
            "production" => Ok((
                "https://launchpad.net".to_string(),
                "https://api.launchpad.net/1.0".to_string(),
            )),
            "staging" => Ok((
                "https://staging.launchpad.net".to_string(),
                "https://api.staging.launchpad.net/1.0".to_string(),
            )),
            other => anyhow::bail!(
                "unknown Launchpad environment '{}' (expected 'production' or 'staging')",
                other
            ),
        }
    }
}
