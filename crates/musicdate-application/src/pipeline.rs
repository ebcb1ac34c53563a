// SPDX-License-Identifier: GPL-3.0-or-later

//! Compound filtering and pagination over a fetched album collection.
//!
//! Stages run in a fixed order: date, search, category, pagination. Each stage
//! only narrows; the source collection is never mutated.

use crate::filter::FilterState;
use chrono::NaiveDate;
use musicdate_domain::{Album, AlbumType, Track};
use serde::{Deserialize, Serialize};

/// Page length shared by the album and track views.
pub const ITEMS_PER_PAGE: usize = 8;

/// A bounded, 1-based window over a filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

/// Filter `albums` by `filter` and cut out the requested page.
///
/// Never fails: an empty result is an empty page 1 of 1.
pub fn project(albums: &[Album], filter: &FilterState) -> Page<Album> {
    let search = filter.search_query.as_deref().map(str::to_lowercase);

    let matching: Vec<&Album> = albums
        .iter()
        .filter(|album| matches_date(album, filter.selected_date))
        .filter(|album| matches_search(album, search.as_deref()))
        .filter(|album| matches_category(album, filter.category.as_deref()))
        .collect();

    paginate(&matching, filter.page).map_items(|album| album.clone())
}

/// Paginate a chart track list with the shared page length.
pub fn project_tracks(tracks: &[Track], page: usize) -> Page<Track> {
    paginate(tracks, page)
}

/// Clamp `requested` into `[1, total_pages]` and slice that window.
pub fn paginate<T: Clone>(items: &[T], requested: usize) -> Page<T> {
    let total_count = items.len();
    let total_pages = total_count.div_ceil(ITEMS_PER_PAGE).max(1);
    let page = requested.clamp(1, total_pages);

    let start = (page - 1) * ITEMS_PER_PAGE;
    let end = (start + ITEMS_PER_PAGE).min(total_count);

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_count,
    }
}

/// Same calendar day. Albums known only to month or year precision never match
/// a selected day. No selected date disables the stage.
fn matches_date(album: &Album, selected: Option<NaiveDate>) -> bool {
    match selected {
        None => true,
        Some(day) => album.release_date.exact_day() == Some(day),
    }
}

/// `query` is already lower-cased.
fn matches_search(album: &Album, query: Option<&str>) -> bool {
    let Some(query) = query else {
        return true;
    };

    album.name.to_lowercase().contains(query)
        || album
            .artists
            .iter()
            .any(|artist| artist.name.to_lowercase().contains(query))
}

/// Albums of an unrecognised upstream type match no category.
fn matches_category(album: &Album, category: Option<&str>) -> bool {
    match category {
        None => true,
        Some(category) if category.eq_ignore_ascii_case("all") => true,
        Some(_) if album.album_type == AlbumType::Other => false,
        Some(category) => album.album_type.as_str().eq_ignore_ascii_case(category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicdate_domain::{AlbumType, ArtistCredit, ReleaseDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn album(name: &str, artist: &str, date: &str, album_type: AlbumType) -> Album {
        Album {
            id: format!("id-{name}"),
            name: name.to_string(),
            artists: vec![ArtistCredit {
                name: artist.to_string(),
            }],
            release_date: ReleaseDate::parse_str(date).unwrap(),
            album_type,
            images: Vec::new(),
            total_tracks: None,
            external_url: None,
        }
    }

    fn filter_on(date: NaiveDate) -> FilterState {
        FilterState {
            selected_date: Some(date),
            search_query: None,
            category: None,
            page: 1,
        }
    }

    #[test]
    fn category_filter_scenario() {
        let albums = vec![
            album("X", "A", "2024-05-01", AlbumType::Single),
            album("Y", "B", "2024-05-01", AlbumType::Album),
        ];
        let filter = FilterState {
            category: Some("album".to_string()),
            ..filter_on(day(2024, 5, 1))
        };

        let page = project(&albums, &filter);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Y");
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let albums: Vec<Album> = (0..20)
            .map(|i| album(&format!("album-{i}"), "A", "2024-05-01", AlbumType::Album))
            .collect();
        let filter = FilterState {
            page: 3,
            ..filter_on(day(2024, 5, 1))
        };

        let page = project(&albums, &filter);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["album-16", "album-17", "album-18", "album-19"]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn page_is_clamped_into_range() {
        let albums: Vec<Album> = (0..10)
            .map(|i| album(&format!("a{i}"), "A", "2024-05-01", AlbumType::Album))
            .collect();

        for (requested, expected) in [(0, 1), (1, 1), (2, 2), (99, 2)] {
            let filter = FilterState {
                page: requested,
                ..filter_on(day(2024, 5, 1))
            };
            let page = project(&albums, &filter);
            assert_eq!(page.page, expected, "requested page {requested}");
            assert_eq!(page.total_pages, 2);
        }
    }

    #[test]
    fn empty_result_is_page_one_of_one() {
        let albums = vec![album("X", "A", "2024-05-01", AlbumType::Single)];
        let filter = FilterState {
            page: 7,
            ..filter_on(day(2023, 1, 1))
        };

        let page = project(&albums, &filter);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 0);

        let page = project(&[], &filter);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn search_matches_name_or_any_artist_case_insensitively() {
        let albums = vec![
            album("Random Access Memories", "Daft Punk", "2024-05-01", AlbumType::Album),
            album("Discovery", "Someone Else", "2024-05-01", AlbumType::Album),
            album("Homework", "Other", "2024-05-01", AlbumType::Album),
        ];

        let by_artist = FilterState {
            search_query: Some("DAFT".to_string()),
            ..filter_on(day(2024, 5, 1))
        };
        let page = project(&albums, &by_artist);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Random Access Memories");

        let by_name = FilterState {
            search_query: Some("disco".to_string()),
            ..filter_on(day(2024, 5, 1))
        };
        let page = project(&albums, &by_name);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Discovery");
    }

    #[test]
    fn search_checks_every_credited_artist() {
        let mut collab = album("Get Lucky", "Daft Punk", "2024-05-01", AlbumType::Single);
        collab.artists.push(ArtistCredit {
            name: "Pharrell Williams".to_string(),
        });

        let filter = FilterState {
            search_query: Some("pharrell".to_string()),
            ..filter_on(day(2024, 5, 1))
        };
        assert_eq!(project(&[collab], &filter).total_count, 1);
    }

    #[test]
    fn category_all_and_none_are_unconstrained() {
        let albums = vec![
            album("X", "A", "2024-05-01", AlbumType::Single),
            album("Y", "B", "2024-05-01", AlbumType::Ep),
            album("Z", "C", "2024-05-01", AlbumType::Album),
        ];

        for category in [None, Some("all"), Some("ALL")] {
            let filter = FilterState {
                category: category.map(str::to_string),
                ..filter_on(day(2024, 5, 1))
            };
            assert_eq!(project(&albums, &filter).total_count, 3);
        }

        let filter = FilterState {
            category: Some("EP".to_string()),
            ..filter_on(day(2024, 5, 1))
        };
        let page = project(&albums, &filter);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Y");
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let albums = vec![album("X", "A", "2024-05-01", AlbumType::Single)];
        let filter = FilterState {
            category: Some("mixtape".to_string()),
            ..filter_on(day(2024, 5, 1))
        };
        assert_eq!(project(&albums, &filter).total_count, 0);
    }

    #[test]
    fn unrecognised_album_type_matches_no_category() {
        let albums = vec![
            album("X", "A", "2024-05-01", AlbumType::Other),
            album("Y", "B", "2024-05-01", AlbumType::Album),
        ];

        for category in ["album", "other", "single"] {
            let filter = FilterState {
                category: Some(category.to_string()),
                ..filter_on(day(2024, 5, 1))
            };
            let page = project(&albums, &filter);
            assert!(page.items.iter().all(|a| a.name != "X"), "{category}");
        }

        let filter = FilterState {
            category: Some("all".to_string()),
            ..filter_on(day(2024, 5, 1))
        };
        assert_eq!(project(&albums, &filter).total_count, 2);
    }

    #[test]
    fn missing_date_disables_date_stage() {
        let albums = vec![
            album("X", "A", "2024-05-01", AlbumType::Single),
            album("Y", "B", "2023-01-09", AlbumType::Album),
        ];
        let filter = FilterState {
            selected_date: None,
            search_query: None,
            category: None,
            page: 1,
        };
        assert_eq!(project(&albums, &filter).total_count, 2);
    }

    #[test]
    fn coarse_precision_never_matches_a_day() {
        let albums = vec![
            album("Year", "A", "2024", AlbumType::Album),
            album("Month", "A", "2024-01", AlbumType::Album),
            album("Day", "A", "2024-01-01", AlbumType::Album),
        ];

        let page = project(&albums, &filter_on(day(2024, 1, 1)));
        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Day"]);
    }

    #[test]
    fn every_album_is_reachable_by_its_release_day() {
        let albums: Vec<Album> = (1..=28)
            .flat_map(|d| {
                (0..3).map(move |i| {
                    album(
                        &format!("{d}-{i}"),
                        "A",
                        &format!("2024-02-{d:02}"),
                        AlbumType::Single,
                    )
                })
            })
            .collect();

        for target in &albums {
            let selected = target.release_date.exact_day().unwrap();
            let first = project(&albums, &filter_on(selected));
            let found = (1..=first.total_pages).any(|p| {
                let filter = FilterState {
                    page: p,
                    ..filter_on(selected)
                };
                project(&albums, &filter).items.contains(target)
            });
            assert!(found, "{} not reachable", target.name);
        }
    }

    #[test]
    fn projection_is_pure() {
        let albums = vec![
            album("X", "A", "2024-05-01", AlbumType::Single),
            album("Y", "B", "2024-05-01", AlbumType::Album),
        ];
        let snapshot = albums.clone();
        let filter = FilterState {
            search_query: Some("y".to_string()),
            ..filter_on(day(2024, 5, 1))
        };

        let first = project(&albums, &filter);
        let second = project(&albums, &filter);
        assert_eq!(first, second);
        assert_eq!(albums, snapshot);
    }

    #[test]
    fn tracks_share_the_page_length() {
        let tracks: Vec<Track> = (0..17)
            .map(|i| Track {
                title: format!("t{i}"),
                subtitle: "artist".to_string(),
                share_link: None,
                images: serde_json::Value::Null,
                preview_url: None,
            })
            .collect();

        let page = project_tracks(&tracks, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "t16");

        let page = project_tracks(&tracks, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), ITEMS_PER_PAGE);
    }
}
