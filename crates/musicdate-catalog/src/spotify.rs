// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Operation, Result};
use crate::models::{AccessToken, NewReleasesQuery, RawCatalogResponse};
use crate::transport::{http_client, send_json, DEFAULT_TIMEOUT};
use musicdate_config::{ClientCredentials, ConfigurationError, SpotifyConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

const ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
const API_BASE: &str = "https://api.spotify.com/v1";

/// Catalog client: client-credentials token exchange and the new-releases listing.
///
/// Holds no state between calls; every catalog read is preceded by its own
/// token exchange.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    credentials: ClientCredentials,
    accounts_base_url: String,
    api_base_url: String,
}

impl SpotifyClient {
    pub fn builder(credentials: ClientCredentials) -> SpotifyClientBuilder {
        SpotifyClientBuilder::new(credentials)
    }

    /// Builder seeded from configuration. Fails when the credential pair is absent.
    pub fn builder_from_config(
        config: &SpotifyConfig,
    ) -> std::result::Result<SpotifyClientBuilder, ConfigurationError> {
        Ok(SpotifyClientBuilder::new(config.credentials()?)
            .accounts_base_url(&config.accounts_base_url)
            .api_base_url(&config.api_base_url))
    }

    /// Exchange the client id/secret for a short-lived bearer token.
    pub async fn fetch_access_token(&self) -> Result<AccessToken> {
        let url = format!("{}/api/token", self.accounts_base_url);
        trace!(target: "catalog", "POST {}", url);

        let request = self
            .client
            .post(&url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")]);

        send_json(Operation::FetchAccessToken, request).await
    }

    /// Read one page of the new-releases listing.
    pub async fn fetch_new_releases(
        &self,
        token: &AccessToken,
        query: NewReleasesQuery,
    ) -> Result<RawCatalogResponse> {
        let url = format!("{}/browse/new-releases", self.api_base_url);
        trace!(target: "catalog", "GET {} limit={} offset={}", url, query.limit, query.offset);

        let request = self
            .client
            .get(&url)
            .bearer_auth(&token.access_token)
            .query(&[
                ("limit", query.limit.to_string()),
                ("offset", query.offset.to_string()),
            ]);

        send_json(Operation::FetchCatalog, request).await
    }
}

#[derive(Debug)]
pub struct SpotifyClientBuilder {
    credentials: ClientCredentials,
    accounts_base_url: String,
    api_base_url: String,
    timeout: Duration,
}

impl SpotifyClientBuilder {
    fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            accounts_base_url: ACCOUNTS_BASE.to_string(),
            api_base_url: API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom accounts (token) base URL, e.g. a mock server.
    pub fn accounts_base_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a custom catalog API base URL.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> reqwest::Result<SpotifyClient> {
        Ok(SpotifyClient {
            client: http_client(self.timeout)?,
            credentials: self.credentials,
            accounts_base_url: self.accounts_base_url,
            api_base_url: self.api_base_url,
        })
    }
}
