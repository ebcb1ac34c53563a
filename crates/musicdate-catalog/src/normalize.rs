// SPDX-License-Identifier: GPL-3.0-or-later

//! Mapping of raw upstream shapes onto the display model.
//!
//! Every function here is pure: identical input always yields identical
//! output. Absent optional fields become `None`/`null`, they never cause a
//! record to be dropped.

use crate::models::{
    RawAlbum, RawArtwork, RawCatalogResponse, RawChartTrack, RawChartsResponse,
    RawSecondaryChartsResponse, RawSong,
};
use musicdate_domain::{
    Album, AlbumType, ArtistCredit, Image, ReleaseDate, ReleaseDatePrecision, Track,
};
use serde_json::{json, Value};
use tracing::warn;

/// Pixel edge of the large artwork variant.
pub const COVER_ART_SIZE: u32 = 800;
/// Pixel edge of the thumbnail artwork variant.
pub const THUMBNAIL_SIZE: u32 = 300;

pub fn normalize_albums(raw: &RawCatalogResponse) -> Vec<Album> {
    raw.albums.items.iter().filter_map(normalize_album).collect()
}

fn normalize_album(raw: &RawAlbum) -> Option<Album> {
    let Some(parsed) = ReleaseDate::parse_str(&raw.release_date) else {
        warn!(
            target: "catalog",
            album_id = %raw.id,
            release_date = %raw.release_date,
            "skipping album with unparseable release date"
        );
        return None;
    };

    let release_date = match raw
        .release_date_precision
        .as_deref()
        .and_then(ReleaseDatePrecision::parse)
    {
        Some(precision) => parsed.truncate(precision),
        None => parsed,
    };

    let album_type = AlbumType::from_upstream(&raw.album_type).unwrap_or_else(|| {
        warn!(
            target: "catalog",
            album_id = %raw.id,
            album_type = %raw.album_type,
            "unknown album type"
        );
        AlbumType::Other
    });

    Some(Album {
        id: raw.id.clone(),
        name: raw.name.clone(),
        artists: raw
            .artists
            .iter()
            .map(|artist| ArtistCredit {
                name: artist.name.clone(),
            })
            .collect(),
        release_date,
        album_type,
        images: raw
            .images
            .iter()
            .map(|image| Image {
                url: image.url.clone(),
                width: image.width,
                height: image.height,
            })
            .collect(),
        total_tracks: raw.total_tracks,
        external_url: raw
            .external_urls
            .as_ref()
            .and_then(|urls| urls.spotify.clone()),
    })
}

pub fn normalize_tracks(raw: &RawChartsResponse) -> Vec<Track> {
    raw.tracks.iter().map(normalize_chart_track).collect()
}

fn normalize_chart_track(raw: &RawChartTrack) -> Track {
    let preview_url = raw.hub.as_ref().and_then(|hub| {
        hub.actions
            .iter()
            .find(|action| action.kind.as_deref() == Some("uri"))
            .and_then(|action| action.uri.clone())
    });

    Track {
        title: raw.title.clone(),
        subtitle: raw.subtitle.clone(),
        share_link: raw.share.as_ref().and_then(|share| share.href.clone()),
        images: raw.images.clone().unwrap_or(Value::Null),
        preview_url,
    }
}

/// Flatten every song chart of the secondary provider into one track list.
pub fn normalize_secondary_tracks(raw: &RawSecondaryChartsResponse) -> Vec<Track> {
    raw.results
        .songs
        .iter()
        .flat_map(|chart| chart.data.iter())
        .map(normalize_song)
        .collect()
}

fn normalize_song(raw: &RawSong) -> Track {
    let attributes = &raw.attributes;
    let images = match &attributes.artwork {
        Some(artwork) => artwork_variants(artwork),
        None => Value::Null,
    };

    Track {
        title: attributes.name.clone(),
        subtitle: attributes.artist_name.clone(),
        share_link: attributes.url.clone(),
        images,
        preview_url: attributes.previews.first().map(|preview| preview.url.clone()),
    }
}

fn artwork_variants(artwork: &RawArtwork) -> Value {
    json!({
        "coverart": fill_artwork_template(&artwork.url, COVER_ART_SIZE),
        "thumbnail": fill_artwork_template(&artwork.url, THUMBNAIL_SIZE),
    })
}

/// Substitute the `{w}` and `{h}` tokens of an artwork URL template.
pub fn fill_artwork_template(template: &str, size: u32) -> String {
    let size = size.to_string();
    template.replace("{w}", &size).replace("{h}", &size)
}
