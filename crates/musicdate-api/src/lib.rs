// SPDX-License-Identifier: GPL-3.0-or-later
pub mod handlers;

use axum::{http::Method, routing::get, Json, Router};
use handlers::albums::{
    list_albums, AlbumResponse, AlbumsResponse, AppliedFilter, ImageResponse, __path_list_albums,
};
use handlers::tracks::{get_tracks, TrackResponse, TracksResponse, __path_get_tracks};
use handlers::ErrorResponse;
use musicdate_application::AppState;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize, utoipa::ToSchema)]
struct HealthResponse {
    status: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(OpenApi)]
#[openapi(
    paths(health, get_tracks, list_albums),
    components(
        schemas(
            HealthResponse,
            TrackResponse,
            TracksResponse,
            AlbumResponse,
            AlbumsResponse,
            AppliedFilter,
            ImageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "charts", description = "Regional top tracks"),
        (name = "releases", description = "New releases with date, search and type filters")
    ),
    info(
        title = "MusicDate API",
        version = "0.1.0",
        description = "New releases and regional charts",
    )
)]
struct ApiDoc;

pub fn router(state: AppState) -> Router {
    info!(target: "api", "building router");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    let api = Router::new()
        .route("/get-tracks", get(get_tracks))
        .route("/albums", get(list_albums));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}
