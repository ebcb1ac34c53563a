// SPDX-License-Identifier: GPL-3.0-or-later

//! Best-effort resolution of the request's effective region.

use crate::sources::CountryLookup;
use musicdate_catalog::{ChartCountry, UpstreamError};
use musicdate_domain::RegionCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Client-geolocation header set by the hosting platform.
pub const PLATFORM_COUNTRY_HEADER: &str = "x-vercel-ip-country";
/// Geolocation header set by the CDN.
pub const CDN_COUNTRY_HEADER: &str = "cf-ipcountry";

/// Country hints taken from the incoming request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCountries {
    pub platform: Option<String>,
    pub cdn: Option<String>,
}

#[derive(Debug, Error)]
pub enum GeoResolutionFailure {
    #[error("ip geolocation is not configured")]
    Unconfigured,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("malformed country code: {0:?}")]
    Malformed(Option<String>),
}

#[derive(Clone)]
pub struct GeoResolver {
    lookup: Option<Arc<dyn CountryLookup>>,
    default_region: RegionCode,
}

impl GeoResolver {
    pub fn new(lookup: Option<Arc<dyn CountryLookup>>, default_region: RegionCode) -> Self {
        Self {
            lookup,
            default_region,
        }
    }

    /// First non-empty value wins: explicit parameter, platform header, CDN
    /// header, IP lookup. A malformed winner or a failed lookup yields the
    /// default region; this never errors.
    pub async fn resolve(&self, explicit: Option<&str>, headers: &HeaderCountries) -> RegionCode {
        let candidates = [
            ("parameter", explicit),
            ("platform_header", headers.platform.as_deref()),
            ("cdn_header", headers.cdn.as_deref()),
        ];

        let first = candidates.into_iter().find_map(|(source, candidate)| {
            candidate
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| (source, value))
        });

        if let Some((source, value)) = first {
            return match RegionCode::parse(value) {
                Some(region) => {
                    debug!(target: "geo", %region, source, "region resolved");
                    region
                }
                None => {
                    warn!(
                        target: "geo",
                        source,
                        value,
                        fallback = %self.default_region,
                        "malformed region code, using default region"
                    );
                    self.default_region
                }
            };
        }

        match self.lookup_ip_region().await {
            Ok(region) => {
                debug!(target: "geo", %region, source = "ip_lookup", "region resolved");
                region
            }
            Err(error) => {
                warn!(
                    target: "geo",
                    %error,
                    fallback = %self.default_region,
                    "ip geolocation failed, using default region"
                );
                self.default_region
            }
        }
    }

    async fn lookup_ip_region(&self) -> Result<RegionCode, GeoResolutionFailure> {
        let lookup = self
            .lookup
            .as_ref()
            .ok_or(GeoResolutionFailure::Unconfigured)?;
        let raw = lookup.lookup_country().await?;
        raw.as_deref()
            .and_then(RegionCode::parse)
            .ok_or(GeoResolutionFailure::Malformed(raw))
    }

    /// Substitute the default region when `region` has no published chart.
    pub fn ensure_supported(&self, region: RegionCode, supported: &[ChartCountry]) -> RegionCode {
        let listed = supported
            .iter()
            .any(|country| RegionCode::parse(&country.id) == Some(region));

        if listed {
            region
        } else {
            warn!(
                target: "geo",
                requested = %region,
                fallback = %self.default_region,
                "no chart for region, falling back to default"
            );
            self.default_region
        }
    }
}
