// SPDX-License-Identifier: GPL-3.0-or-later

//! Request-scoped fetch, normalization and fan-out for the album and track views.

use crate::geo::{GeoResolver, HeaderCountries};
use crate::sources::{CatalogSource, ChartSource, SecondaryChartSource};
use moka::sync::Cache;
use musicdate_catalog::{
    normalize_albums, normalize_secondary_tracks, normalize_tracks, UpstreamError,
};
use musicdate_config::ConfigurationError;
use musicdate_domain::{Album, RegionCode, Track};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Top tracks together with the region they were fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTracks {
    pub tracks: Vec<Track>,
    pub region: RegionCode,
}

pub struct ChartService {
    source: Option<Arc<dyn ChartSource>>,
    geo: GeoResolver,
}

impl ChartService {
    pub fn new(source: Option<Arc<dyn ChartSource>>, geo: GeoResolver) -> Self {
        Self { source, geo }
    }

    /// Top tracks for the caller's effective region.
    ///
    /// Only a missing charts configuration or a failed chart call is an error;
    /// geolocation problems and unsupported regions degrade to the default region.
    #[instrument(target = "discovery", skip(self, headers))]
    pub async fn top_tracks(
        &self,
        explicit: Option<&str>,
        headers: &HeaderCountries,
    ) -> Result<ChartTracks, DiscoveryError> {
        let source = self
            .source
            .as_ref()
            .ok_or(ConfigurationError("charts.api_key"))?;

        let requested = self.geo.resolve(explicit, headers).await;

        let list = source.chart_countries().await?;
        let region = self.geo.ensure_supported(requested, &list.countries);

        let raw = source.top_tracks(region).await?;
        let tracks = normalize_tracks(&raw);
        info!(target: "discovery", %region, count = tracks.len(), "fetched top tracks");

        Ok(ChartTracks { tracks, region })
    }
}

/// New releases plus the secondary song chart for the album view.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub albums: Arc<Vec<Album>>,
    pub charts: Vec<Track>,
}

const NEW_RELEASES_KEY: &str = "new-releases";

pub struct ReleaseService {
    catalog: Option<Arc<dyn CatalogSource>>,
    secondary: Option<Arc<dyn SecondaryChartSource>>,
    default_storefront: String,
    cache: Option<Cache<&'static str, Arc<Vec<Album>>>>,
}

impl ReleaseService {
    /// `cache_ttl` of zero fetches the catalog on every call.
    pub fn new(
        catalog: Option<Arc<dyn CatalogSource>>,
        secondary: Option<Arc<dyn SecondaryChartSource>>,
        default_storefront: impl Into<String>,
        cache_ttl: Duration,
    ) -> Self {
        let cache = (!cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(cache_ttl)
                .build()
        });

        Self {
            catalog,
            secondary,
            default_storefront: default_storefront.into(),
            cache,
        }
    }

    /// The normalized new-releases listing.
    pub async fn new_releases(&self) -> Result<Arc<Vec<Album>>, DiscoveryError> {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(NEW_RELEASES_KEY)) {
            debug!(target: "discovery", count = cached.len(), "new releases served from cache");
            return Ok(cached);
        }

        let catalog = self
            .catalog
            .as_ref()
            .ok_or(ConfigurationError("spotify.client_id"))?;

        let raw = catalog.new_releases().await?;
        let albums = Arc::new(normalize_albums(&raw));
        info!(target: "discovery", count = albums.len(), "fetched new releases");

        if let Some(cache) = &self.cache {
            cache.insert(NEW_RELEASES_KEY, albums.clone());
        }
        Ok(albums)
    }

    /// Catalog and secondary charts fetched concurrently. The catalog must
    /// succeed; a missing or failing secondary source yields no chart tracks.
    pub async fn discover(&self, region: Option<RegionCode>) -> Result<Discovery, DiscoveryError> {
        let storefront = region
            .map(|r| r.to_lowercase())
            .unwrap_or_else(|| self.default_storefront.clone());

        let (albums, charts) = tokio::join!(self.new_releases(), self.secondary_tracks(&storefront));

        let charts = match charts {
            Ok(tracks) => tracks,
            Err(error) => {
                warn!(target: "discovery", %error, %storefront, "secondary charts unavailable");
                Vec::new()
            }
        };

        Ok(Discovery {
            albums: albums?,
            charts,
        })
    }

    async fn secondary_tracks(&self, storefront: &str) -> Result<Vec<Track>, DiscoveryError> {
        let source = self
            .secondary
            .as_ref()
            .ok_or(ConfigurationError("secondary_charts.bearer_token"))?;
        let raw = source.top_songs(storefront).await?;
        Ok(normalize_secondary_tracks(&raw))
    }
}
