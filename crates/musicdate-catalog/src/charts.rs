// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Operation, Result};
use crate::models::{RawChartList, RawChartsResponse};
use crate::transport::{http_client, send_json, DEFAULT_TIMEOUT};
use musicdate_config::{ApiKeyHost, ChartsConfig, ConfigurationError};
use musicdate_domain::RegionCode;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::trace;

/// Client for the regional charts provider (API key + host header pair).
#[derive(Debug, Clone)]
pub struct ChartsClient {
    client: Client,
    credentials: ApiKeyHost,
    base_url: String,
    locale: String,
    page_size: u32,
}

impl ChartsClient {
    pub fn builder(credentials: ApiKeyHost) -> ChartsClientBuilder {
        ChartsClientBuilder::new(credentials)
    }

    pub fn builder_from_config(
        config: &ChartsConfig,
    ) -> std::result::Result<ChartsClientBuilder, ConfigurationError> {
        let mut builder = ChartsClientBuilder::new(config.credentials()?)
            .locale(&config.locale)
            .page_size(config.page_size);
        if let Some(base_url) = config.base_url.as_deref() {
            builder = builder.base_url(base_url);
        }
        Ok(builder)
    }

    /// Regions the provider publishes charts for.
    pub async fn fetch_chart_countries(&self) -> Result<RawChartList> {
        let url = format!("{}/charts/list", self.base_url);
        trace!(target: "catalog", "GET {}", url);
        send_json(
            Operation::FetchChartCountries,
            self.authorize(self.client.get(&url)),
        )
        .await
    }

    /// Top tracks for one region.
    pub async fn fetch_top_tracks(&self, region: RegionCode) -> Result<RawChartsResponse> {
        let url = format!("{}/charts/track", self.base_url);
        trace!(target: "catalog", "GET {} countryCode={}", url, region);

        let request = self.authorize(self.client.get(&url)).query(&[
            ("locale", self.locale.clone()),
            ("pageSize", self.page_size.to_string()),
            ("startFrom", "0".to_string()),
            ("countryCode", region.to_string()),
        ]);

        send_json(Operation::FetchTopTracks, request).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-RapidAPI-Key", self.credentials.api_key.trim())
            .header("X-RapidAPI-Host", self.credentials.api_host.trim())
    }
}

#[derive(Debug)]
pub struct ChartsClientBuilder {
    credentials: ApiKeyHost,
    base_url: Option<String>,
    locale: String,
    page_size: u32,
    timeout: Duration,
}

impl ChartsClientBuilder {
    fn new(credentials: ApiKeyHost) -> Self {
        Self {
            credentials,
            base_url: None,
            locale: "en-US".to_string(),
            page_size: 100,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the default `https://{api_host}` base.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> reqwest::Result<ChartsClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| format!("https://{}", self.credentials.api_host.trim()));

        Ok(ChartsClient {
            client: http_client(self.timeout)?,
            credentials: self.credentials,
            base_url,
            locale: self.locale,
            page_size: self.page_size,
        })
    }
}
