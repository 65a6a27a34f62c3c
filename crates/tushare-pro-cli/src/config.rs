/*
[INPUT]:  YAML configuration file, TUSHARE_TOKEN, --token flag
[OUTPUT]: Validated token and client configuration
[POS]:    Configuration layer - CLI setup
[UPDATE]: When adding new configuration options
*/

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tushare_pro_adapter::ClientConfig;
use tushare_pro_adapter::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Environment variable consulted for the API token
pub const TOKEN_ENV: &str = "TUSHARE_TOKEN";

/// Top-level configuration for the CLI
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// API token; flag and environment take precedence
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            token: None,
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
        }
    }
}

impl CliConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load an explicit config file, or the default one when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Pick the token: flag, then environment, then file.
    ///
    /// Blank candidates are skipped; the chosen token is returned verbatim.
    pub fn resolve_token(&self, flag: Option<&str>, env: Option<&str>) -> Result<String> {
        [flag, env, self.token.as_deref()]
            .into_iter()
            .flatten()
            .find(|token| !token.trim().is_empty())
            .map(str::to_string)
            .with_context(|| {
                format!("no API token: pass --token, set {TOKEN_ENV}, or add `token` to the config file")
            })
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(ClientConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_base_url(self.base_url.clone()))
    }
}

/// `<config dir>/tushare-pro/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tushare-pro").join("config.yaml"))
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
