// SPDX-License-Identifier: GPL-3.0-or-later
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use musicdate_application::{project_tracks, AppState};
use musicdate_domain::Track;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use super::{discovery_failure, header_countries, page_param, ErrorResponse};

const TOP_TRACKS_FAILED: &str = "An error occurred while fetching top tracks.";

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TracksQuery {
    /// Two-letter region code; takes precedence over geolocation.
    pub country_code: Option<String>,
    /// Paginate the chart when present.
    #[param(value_type = Option<usize>)]
    pub page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub title: String,
    pub subtitle: String,
    pub share_link: Option<String>,
    /// Provider-specific artwork object, passed through as received.
    #[schema(value_type = Object)]
    pub images: serde_json::Value,
    pub preview_url: Option<String>,
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self {
            title: track.title,
            subtitle: track.subtitle,
            share_link: track.share_link,
            images: track.images,
            preview_url: track.preview_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TracksResponse {
    pub tracks: Vec<TrackResponse>,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

/// Top chart tracks for the caller's region
#[utoipa::path(
    get,
    path = "/api/get-tracks",
    params(TracksQuery),
    responses(
        (status = 200, description = "Chart tracks for the effective region", body = TracksResponse),
        (status = 500, description = "Configuration missing or upstream failure", body = ErrorResponse)
    ),
    tag = "charts"
)]
pub async fn get_tracks(
    State(state): State<AppState>,
    Query(query): Query<TracksQuery>,
    headers: HeaderMap,
) -> Response {
    debug!(target: "api", ?query, "fetching top tracks");

    let result = match state
        .charts
        .top_tracks(query.country_code.as_deref(), &header_countries(&headers))
        .await
    {
        Ok(result) => result,
        Err(err) => return discovery_failure(&err, TOP_TRACKS_FAILED),
    };

    let country_code = result.region.to_string();
    let response = match page_param(query.page.as_deref()) {
        Some(requested) => {
            let page = project_tracks(&result.tracks, requested);
            TracksResponse {
                tracks: page.items.into_iter().map(TrackResponse::from).collect(),
                country_code,
                page: Some(page.page),
                total_pages: Some(page.total_pages),
                total_count: Some(page.total_count),
            }
        }
        None => TracksResponse {
            tracks: result.tracks.into_iter().map(TrackResponse::from).collect(),
            country_code,
            page: None,
            total_pages: None,
            total_count: None,
        },
    };

    Json(response).into_response()
}
