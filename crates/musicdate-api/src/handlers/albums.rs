// SPDX-License-Identifier: GPL-3.0-or-later
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use musicdate_application::{AppState, FilterQuery, FilterSession};
use musicdate_domain::{Album, Image, RegionCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use super::tracks::TrackResponse;
use super::{discovery_failure, page_param, ErrorResponse};

const NEW_RELEASES_FAILED: &str = "An error occurred while fetching new releases.";

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AlbumsQuery {
    /// Release day as `01-May-2024`; defaults to today.
    pub date: Option<String>,
    pub search: Option<String>,
    /// `All`, `Single`, `EP` or `Album`.
    #[serde(rename = "type")]
    pub category: Option<String>,
    #[param(value_type = Option<usize>)]
    pub page: Option<String>,
    /// Storefront for the secondary chart.
    pub country_code: Option<String>,
}

impl AlbumsQuery {
    fn filter_query(&self) -> FilterQuery {
        FilterQuery {
            date: self.date.clone(),
            search: self.search.clone(),
            category: self.category.clone(),
            page: page_param(self.page.as_deref()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub release_date: String,
    pub release_date_precision: String,
    pub album_type: String,
    pub images: Vec<ImageResponse>,
    pub total_tracks: Option<u32>,
    pub external_url: Option<String>,
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        Self {
            release_date_precision: album.release_date_precision().as_str().to_string(),
            id: album.id,
            name: album.name,
            artists: album.artists.into_iter().map(|a| a.name).collect(),
            release_date: album.release_date.to_string(),
            album_type: album.album_type.to_string(),
            images: album.images.into_iter().map(ImageResponse::from).collect(),
            total_tracks: album.total_tracks,
            external_url: album.external_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedFilter {
    pub date: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumsResponse {
    pub items: Vec<AlbumResponse>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    /// Selected day for display, or `Select a date`.
    pub heading: String,
    pub filter: AppliedFilter,
    pub charts: Vec<TrackResponse>,
}

/// New releases filtered by date, search and type, one page at a time
#[utoipa::path(
    get,
    path = "/api/albums",
    params(AlbumsQuery),
    responses(
        (status = 200, description = "Filtered page of new releases", body = AlbumsResponse),
        (status = 500, description = "Configuration missing or upstream failure", body = ErrorResponse)
    ),
    tag = "releases"
)]
pub async fn list_albums(
    State(state): State<AppState>,
    Query(query): Query<AlbumsQuery>,
) -> Response {
    debug!(target: "api", ?query, "listing albums");

    let session = FilterSession::from_query(&query.filter_query(), Local::now().date_naive());
    let region = query.country_code.as_deref().and_then(RegionCode::parse);

    let discovery = match state.releases.discover(region).await {
        Ok(discovery) => discovery,
        Err(err) => return discovery_failure(&err, NEW_RELEASES_FAILED),
    };

    let page = session.view(&discovery.albums);
    let applied = session.state().to_query();

    Json(AlbumsResponse {
        items: page.items.into_iter().map(AlbumResponse::from).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_count: page.total_count,
        heading: session.heading(),
        filter: AppliedFilter {
            date: applied.date,
            search: applied.search,
            category: applied.category,
        },
        charts: discovery.charts.into_iter().map(TrackResponse::from).collect(),
    })
    .into_response()
}
