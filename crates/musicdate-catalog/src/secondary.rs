// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Operation, Result};
use crate::models::RawSecondaryChartsResponse;
use crate::transport::{http_client, send_json, DEFAULT_TIMEOUT};
use musicdate_config::{ConfigurationError, SecondaryChartsConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

const API_BASE: &str = "https://api.music.apple.com/v1";

/// Client for the secondary song charts provider (static bearer token).
#[derive(Debug, Clone)]
pub struct SecondaryChartsClient {
    client: Client,
    bearer_token: String,
    base_url: String,
    limit: u32,
}

impl SecondaryChartsClient {
    pub fn builder(bearer_token: impl Into<String>) -> SecondaryChartsClientBuilder {
        SecondaryChartsClientBuilder {
            bearer_token: bearer_token.into(),
            base_url: API_BASE.to_string(),
            limit: 50,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn builder_from_config(
        config: &SecondaryChartsConfig,
    ) -> std::result::Result<SecondaryChartsClientBuilder, ConfigurationError> {
        Ok(Self::builder(config.bearer_token()?)
            .base_url(&config.base_url)
            .limit(config.limit))
    }

    /// Song charts for a storefront (lower-case two-letter code).
    pub async fn fetch_top_songs(&self, storefront: &str) -> Result<RawSecondaryChartsResponse> {
        let url = format!("{}/catalog/{}/charts", self.base_url, storefront);
        trace!(target: "catalog", "GET {}", url);

        let request = self
            .client
            .get(&url)
            .bearer_auth(self.bearer_token.trim())
            .query(&[("types", "songs".to_string()), ("limit", self.limit.to_string())]);

        send_json(Operation::FetchSecondaryCharts, request).await
    }
}

#[derive(Debug)]
pub struct SecondaryChartsClientBuilder {
    bearer_token: String,
    base_url: String,
    limit: u32,
    timeout: Duration,
}

impl SecondaryChartsClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> reqwest::Result<SecondaryChartsClient> {
        Ok(SecondaryChartsClient {
            client: http_client(self.timeout)?,
            bearer_token: self.bearer_token,
            base_url: self.base_url,
            limit: self.limit,
        })
    }
}
