// SPDX-License-Identifier: GPL-3.0-or-later

//! Seams between the services and the upstream clients.

use async_trait::async_trait;
use musicdate_catalog::{
    ChartsClient, IpGeolocationClient, NewReleasesQuery, RawCatalogResponse, RawChartList,
    RawChartsResponse, RawSecondaryChartsResponse, SecondaryChartsClient, SpotifyClient,
    UpstreamError,
};
use musicdate_domain::RegionCode;

/// Primary album catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn new_releases(&self) -> Result<RawCatalogResponse, UpstreamError>;
}

/// Regional chart provider with a published list of supported regions.
#[async_trait]
pub trait ChartSource: Send + Sync {
    async fn chart_countries(&self) -> Result<RawChartList, UpstreamError>;
    async fn top_tracks(&self, region: RegionCode) -> Result<RawChartsResponse, UpstreamError>;
}

/// Secondary song charts, addressed by lower-case storefront code.
#[async_trait]
pub trait SecondaryChartSource: Send + Sync {
    async fn top_songs(&self, storefront: &str)
        -> Result<RawSecondaryChartsResponse, UpstreamError>;
}

/// IP-based country lookup. Returns the raw country code as reported.
#[async_trait]
pub trait CountryLookup: Send + Sync {
    async fn lookup_country(&self) -> Result<Option<String>, UpstreamError>;
}

/// Catalog client paired with its page size.
pub struct SpotifyCatalog {
    client: SpotifyClient,
    query: NewReleasesQuery,
}

impl SpotifyCatalog {
    pub fn new(client: SpotifyClient, limit: u32) -> Self {
        Self {
            client,
            query: NewReleasesQuery { limit, offset: 0 },
        }
    }
}

#[async_trait]
impl CatalogSource for SpotifyCatalog {
    async fn new_releases(&self) -> Result<RawCatalogResponse, UpstreamError> {
        let token = self.client.fetch_access_token().await?;
        self.client.fetch_new_releases(&token, self.query).await
    }
}

#[async_trait]
impl ChartSource for ChartsClient {
    async fn chart_countries(&self) -> Result<RawChartList, UpstreamError> {
        self.fetch_chart_countries().await
    }

    async fn top_tracks(&self, region: RegionCode) -> Result<RawChartsResponse, UpstreamError> {
        self.fetch_top_tracks(region).await
    }
}

#[async_trait]
impl SecondaryChartSource for SecondaryChartsClient {
    async fn top_songs(
        &self,
        storefront: &str,
    ) -> Result<RawSecondaryChartsResponse, UpstreamError> {
        self.fetch_top_songs(storefront).await
    }
}

#[async_trait]
impl CountryLookup for IpGeolocationClient {
    async fn lookup_country(&self) -> Result<Option<String>, UpstreamError> {
        Ok(IpGeolocationClient::lookup_country(self).await?.country_code)
    }
}
