// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Operation, Result};
use crate::models::IpLookupResponse;
use crate::transport::{http_client, send_json};
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

/// IP geolocation lookup for the caller's address as seen by the provider.
#[derive(Debug, Clone)]
pub struct IpGeolocationClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl IpGeolocationClient {
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn lookup_country(&self) -> Result<IpLookupResponse> {
        let url = format!("{}/check", self.base_url);
        trace!(target: "catalog", "GET {}", url);

        let request = self
            .client
            .get(&url)
            .query(&[("access_key", self.api_key.trim())]);

        send_json(Operation::LookupIpCountry, request).await
    }
}
