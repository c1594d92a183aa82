use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::model::horizon::Horizon;

pub const DEFAULT_API_URL: &str = "https://sp500-forecasting-production.up.railway.app";
pub const API_URL_ENV: &str = "FORECAST_API_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-source deadline for one fetch cycle; 0 waits indefinitely.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    #[serde(default = "default_horizon_key")]
    pub default_horizon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Seconds between automatic fetch cycles; 0 disables.
    #[serde(default = "default_auto_refresh_secs")]
    pub auto_refresh_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    15_000
}

fn default_horizon_key() -> String {
    "1d".to_string()
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_auto_refresh_secs() -> u64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            default_horizon: default_horizon_key(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            auto_refresh_secs: default_auto_refresh_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Validate an API base URL: absolute http(s) with a host.
pub fn validate_base_url(s: &str) -> Result<String> {
    let trimmed = s.trim();
    let parsed =
        url::Url::parse(trimmed).with_context(|| format!("invalid base url '{}'", trimmed))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!(
            "invalid base url '{}': unsupported scheme '{}', expected http or https",
            trimmed,
            other
        ),
    }
    if parsed.host_str().is_none() {
        bail!("invalid base url '{}': missing host", trimmed);
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

impl ApiConfig {
    pub fn horizon(&self) -> Result<Horizon> {
        self.default_horizon.parse()
    }

    pub fn fetch_deadline(&self) -> Option<Duration> {
        if self.fetch_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.fetch_timeout_ms))
        }
    }

    /// Environment wins over the file; blank values are ignored.
    pub fn apply_env_override(&mut self, env_value: Option<String>) {
        if let Some(v) = env_value.filter(|v| !v.trim().is_empty()) {
            self.base_url = v;
        }
    }
}

impl UiConfig {
    pub fn auto_refresh(&self) -> Option<Duration> {
        if self.auto_refresh_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.auto_refresh_secs))
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(Path::new("config/default.toml"), std::env::var(API_URL_ENV).ok())
    }

    /// Read `path` when it exists (built-in defaults otherwise), then apply the
    /// base-URL override and validate.
    pub fn load_from(path: &Path, api_url_override: Option<String>) -> Result<Self> {
        let mut config: Config = if path.exists() {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&config_str)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            Config::default()
        };

        config.api.apply_env_override(api_url_override);
        config.api.base_url =
            validate_base_url(&config.api.base_url).context("api.base_url is invalid")?;
        config
            .api
            .horizon()
            .context("api.default_horizon is invalid")?;

        Ok(config)
    }
}
