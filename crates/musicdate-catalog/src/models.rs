// SPDX-License-Identifier: GPL-3.0-or-later

//! Raw upstream response shapes, as delivered on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bearer token issued by the client-credentials exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

// ============================================================================
// Catalog (new releases)
// ============================================================================

/// Paging parameters for the new-releases listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewReleasesQuery {
    pub limit: u32,
    pub offset: u32,
}

impl Default for NewReleasesQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCatalogResponse {
    pub albums: RawAlbumPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAlbumPage {
    #[serde(default)]
    pub items: Vec<RawAlbum>,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAlbum {
    pub id: String,
    pub name: String,
    /// `album`, `single`, `ep` or `compilation`.
    pub album_type: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub images: Vec<RawImage>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, see `release_date_precision`.
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub external_urls: Option<RawExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArtist {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

// ============================================================================
// Charts provider
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChartList {
    #[serde(default)]
    pub countries: Vec<ChartCountry>,
}

/// A region the charts provider publishes a chart for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartCountry {
    /// Two-letter country code.
    pub id: String,
    #[serde(default)]
    pub listid: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChartsResponse {
    #[serde(default)]
    pub tracks: Vec<RawChartTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChartTrack {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub share: Option<RawShare>,
    #[serde(default)]
    pub images: Option<Value>,
    #[serde(default)]
    pub hub: Option<RawHub>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawShare {
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHub {
    #[serde(default)]
    pub actions: Vec<RawHubAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHubAction {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

// ============================================================================
// Secondary charts provider
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSecondaryChartsResponse {
    pub results: RawSecondaryResults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSecondaryResults {
    #[serde(default)]
    pub songs: Vec<RawSongChart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSongChart {
    #[serde(default)]
    pub chart: Option<String>,
    #[serde(default)]
    pub data: Vec<RawSong>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSong {
    #[serde(default)]
    pub id: Option<String>,
    pub attributes: RawSongAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSongAttributes {
    pub name: String,
    #[serde(rename = "artistName", default)]
    pub artist_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub artwork: Option<RawArtwork>,
    #[serde(default)]
    pub previews: Vec<RawPreview>,
}

/// Artwork with a `{w}`/`{h}` templated URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArtwork {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPreview {
    pub url: String,
}

// ============================================================================
// IP geolocation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLookupResponse {
    #[serde(default)]
    pub country_code: Option<String>,
}
