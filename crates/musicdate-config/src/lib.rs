// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// A required credential or key is absent from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing configuration value: {0}")]
pub struct ConfigurationError(pub &'static str);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub upstream_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5150,
            upstream_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// Client-credentials pair for the catalog token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub accounts_base_url: String,
    pub api_base_url: String,
    pub new_releases_limit: u32,
    /// Lifetime of the memoised new-releases listing; 0 disables the cache.
    pub cache_ttl_secs: u64,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            accounts_base_url: "https://accounts.spotify.com".to_string(),
            api_base_url: "https://api.spotify.com/v1".to_string(),
            new_releases_limit: 50,
            cache_ttl_secs: 3600,
        }
    }
}

impl SpotifyConfig {
    pub fn credentials(&self) -> Result<ClientCredentials, ConfigurationError> {
        Ok(ClientCredentials {
            client_id: required(&self.client_id, "spotify.client_id")?,
            client_secret: required(&self.client_secret, "spotify.client_secret")?,
        })
    }
}

/// API key/host pair for the charts provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyHost {
    pub api_key: String,
    pub api_host: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    /// Overrides `https://{api_host}` as the request base.
    pub base_url: Option<String>,
    pub locale: String,
    pub page_size: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: None,
            base_url: None,
            locale: "en-US".to_string(),
            page_size: 100,
        }
    }
}

impl ChartsConfig {
    pub fn credentials(&self) -> Result<ApiKeyHost, ConfigurationError> {
        Ok(ApiKeyHost {
            api_key: required(&self.api_key, "charts.api_key")?,
            api_host: required(&self.api_host, "charts.api_host")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_region: String,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.ipapi.com/api".to_string(),
            default_region: "DE".to_string(),
        }
    }
}

impl GeolocationConfig {
    pub fn api_key(&self) -> Result<String, ConfigurationError> {
        required(&self.api_key, "geolocation.api_key")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryChartsConfig {
    pub bearer_token: Option<String>,
    pub base_url: String,
    pub storefront: String,
    pub limit: u32,
}

impl Default for SecondaryChartsConfig {
    fn default() -> Self {
        Self {
            bearer_token: None,
            base_url: "https://api.music.apple.com/v1".to_string(),
            storefront: "us".to_string(),
            limit: 50,
        }
    }
}

impl SecondaryChartsConfig {
    pub fn bearer_token(&self) -> Result<String, ConfigurationError> {
        required(&self.bearer_token, "secondary_charts.bearer_token")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub telemetry: TelemetryConfig,
    pub spotify: SpotifyConfig,
    pub charts: ChartsConfig,
    pub geolocation: GeolocationConfig,
    pub secondary_charts: SecondaryChartsConfig,
}

/// Plain environment variable names accepted alongside the prefixed form.
const PLAIN_ENV_KEYS: &[(&str, &str)] = &[
    ("SPOTIFY_CLIENT_ID", "spotify.client_id"),
    ("SPOTIFY_CLIENT_SECRET", "spotify.client_secret"),
    ("RAPID_API_KEY", "charts.api_key"),
    ("RAPID_API_HOST", "charts.api_host"),
    ("IP_API_KEY", "geolocation.api_key"),
    ("APPLE_MUSIC_TOKEN", "secondary_charts.bearer_token"),
];

/// Load configuration from defaults, optional TOML file, plain provider variables
/// and prefixed environment overrides (prefix: MUSICDATE_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    for &(var, key) in PLAIN_ENV_KEYS {
        figment = figment.merge(Env::raw().only(&[var]).map(move |_| key.into()));
    }

    figment = figment.merge(Env::prefixed("MUSICDATE_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, ConfigurationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigurationError(key)),
    }
}
