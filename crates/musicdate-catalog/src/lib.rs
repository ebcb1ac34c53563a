// SPDX-License-Identifier: GPL-3.0-or-later

//! Upstream clients for the release catalog, the regional charts providers
//! and IP geolocation, plus normalization of their responses into the
//! display model.
//!
//! Clients hold no state across requests and perform no retries; every
//! failure surfaces as an [`UpstreamError`] naming the failed operation.

pub mod charts;
#[cfg(test)]
mod client_tests;
pub mod error;
pub mod geolocation;
pub mod models;
pub mod normalize;
pub mod secondary;
pub mod spotify;
mod transport;

pub use charts::ChartsClient;
pub use error::{Operation, Result, UpstreamError};
pub use geolocation::IpGeolocationClient;
pub use models::{
    AccessToken, ChartCountry, IpLookupResponse, NewReleasesQuery, RawCatalogResponse,
    RawChartList, RawChartsResponse, RawSecondaryChartsResponse,
};
pub use normalize::{normalize_albums, normalize_secondary_tracks, normalize_tracks};
pub use secondary::SecondaryChartsClient;
pub use spotify::SpotifyClient;
