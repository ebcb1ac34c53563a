// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use musicdate_catalog::{ChartsClient, IpGeolocationClient, SecondaryChartsClient, SpotifyClient};
use musicdate_config::AppConfig;
use musicdate_domain::RegionCode;
use tracing::{info, warn};

pub mod discovery;
pub mod filter;
pub mod geo;
pub mod pipeline;
pub mod session;
pub mod sources;

pub use discovery::{ChartService, ChartTracks, Discovery, DiscoveryError, ReleaseService};
pub use filter::{format_date_param, parse_date_param, FilterQuery, FilterState};
pub use geo::{GeoResolutionFailure, GeoResolver, HeaderCountries};
pub use pipeline::{paginate, project, project_tracks, Page, ITEMS_PER_PAGE};
pub use session::FilterSession;
pub use sources::{CatalogSource, ChartSource, CountryLookup, SecondaryChartSource, SpotifyCatalog};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub charts: Arc<ChartService>,
    pub releases: Arc<ReleaseService>,
}

impl AppState {
    pub fn new(config: AppConfig, charts: ChartService, releases: ReleaseService) -> Self {
        Self {
            config: Arc::new(config),
            charts: Arc::new(charts),
            releases: Arc::new(releases),
        }
    }

    /// Wire the upstream clients described by `config`. Providers without
    /// credentials are left out; requests needing them fail at call time.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.http.upstream_timeout_secs);

        let catalog: Option<Arc<dyn CatalogSource>> =
            match SpotifyClient::builder_from_config(&config.spotify) {
                Ok(builder) => Some(Arc::new(SpotifyCatalog::new(
                    builder.timeout(timeout).build()?,
                    config.spotify.new_releases_limit,
                ))),
                Err(missing) => {
                    warn!(target: "application", %missing, "catalog provider disabled");
                    None
                }
            };

        let charts: Option<Arc<dyn ChartSource>> =
            match ChartsClient::builder_from_config(&config.charts) {
                Ok(builder) => Some(Arc::new(builder.timeout(timeout).build()?)),
                Err(missing) => {
                    warn!(target: "application", %missing, "charts provider disabled");
                    None
                }
            };

        let secondary: Option<Arc<dyn SecondaryChartSource>> =
            match SecondaryChartsClient::builder_from_config(&config.secondary_charts) {
                Ok(builder) => Some(Arc::new(builder.timeout(timeout).build()?)),
                Err(missing) => {
                    warn!(target: "application", %missing, "secondary charts disabled");
                    None
                }
            };

        let lookup: Option<Arc<dyn CountryLookup>> = match config.geolocation.api_key() {
            Ok(api_key) => Some(Arc::new(IpGeolocationClient::with_base_url(
                api_key,
                &config.geolocation.base_url,
                timeout,
            )?)),
            Err(missing) => {
                warn!(target: "application", %missing, "ip geolocation disabled");
                None
            }
        };

        let default_region = match RegionCode::parse(&config.geolocation.default_region) {
            Some(region) => region,
            None => {
                warn!(
                    target: "application",
                    configured = %config.geolocation.default_region,
                    "invalid default region, using DE"
                );
                RegionCode::GERMANY
            }
        };

        let charts = ChartService::new(charts, GeoResolver::new(lookup, default_region));
        let releases = ReleaseService::new(
            catalog,
            secondary,
            config.secondary_charts.storefront.clone(),
            Duration::from_secs(config.spotify.cache_ttl_secs),
        );

        Ok(Self::new(config, charts, releases))
    }

    pub fn on_start(&self) {
        info!(target: "application", "application state initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_providers_fail_at_call_time() {
        let state = AppState::from_config(AppConfig::default()).unwrap();

        let err = state
            .charts
            .top_tracks(Some("DE"), &HeaderCountries::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Configuration(_)));

        let err = state.releases.new_releases().await.unwrap_err();
        assert!(matches!(err, DiscoveryError::Configuration(_)));
    }

    #[test]
    fn configured_providers_are_built() {
        let mut config = AppConfig::default();
        config.spotify.client_id = Some("id".into());
        config.spotify.client_secret = Some("secret".into());
        config.charts.api_key = Some("key".into());
        config.charts.api_host = Some("charts.example.com".into());
        config.geolocation.default_region = "not a region".into();

        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.config.charts.api_host.as_deref(), Some("charts.example.com"));
    }
}
