// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpstreamError>;

/// The upstream call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchAccessToken,
    FetchCatalog,
    FetchChartCountries,
    FetchTopTracks,
    FetchSecondaryCharts,
    LookupIpCountry,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchAccessToken => "fetch_access_token",
            Self::FetchCatalog => "fetch_catalog",
            Self::FetchChartCountries => "fetch_chart_countries",
            Self::FetchTopTracks => "fetch_top_tracks",
            Self::FetchSecondaryCharts => "fetch_secondary_charts",
            Self::LookupIpCountry => "lookup_ip_country",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{operation}: HTTP request failed: {source}")]
    Request {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: upstream returned status {status}: {body}")]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },

    #[error("{operation}: invalid response: {message}")]
    InvalidResponse {
        operation: Operation,
        message: String,
    },
}

impl UpstreamError {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Request { operation, .. }
            | Self::Status { operation, .. }
            | Self::InvalidResponse { operation, .. } => *operation,
        }
    }

    pub(crate) fn request(operation: Operation) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Request { operation, source }
    }
}
