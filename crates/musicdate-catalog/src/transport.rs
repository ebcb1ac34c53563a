// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Operation, Result, UpstreamError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("MusicDate/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Send a request and decode a JSON body, mapping every failure onto `operation`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    operation: Operation,
    request: RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(UpstreamError::request(operation))?;

    let status = response.status();
    debug!(target: "catalog", %operation, %status, "response status");

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(UpstreamError::Status {
            operation,
            status: status.as_u16(),
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(UpstreamError::request(operation))?;
    trace!(target: "catalog", %operation, bytes = body.len(), "response body received");

    serde_json::from_str(&body).map_err(|e| UpstreamError::InvalidResponse {
        operation,
        message: format!("Failed to parse response: {}", e),
    })
}
