// SPDX-License-Identifier: GPL-3.0-or-later

//! The user-controlled predicate set and its URL representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// URL date format: two-digit day, three-letter month, four-digit year.
const DATE_PARAM_FORMAT: &str = "%d-%b-%Y";

/// Query parameters as they appear in the navigable URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(rename = "type", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// `None` disables the date stage.
    pub selected_date: Option<NaiveDate>,
    pub search_query: Option<String>,
    /// Lower-cased; `None` or `all` means no constraint.
    pub category: Option<String>,
    /// 1-based; re-clamped against the filtered result on every projection.
    pub page: usize,
}

impl FilterState {
    /// Fresh state for `today` with no search or category constraint.
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            selected_date: Some(today),
            search_query: None,
            category: None,
            page: 1,
        }
    }

    /// Absent `date` selects `today`; a present but unparseable one disables
    /// the date stage.
    pub fn from_query(query: &FilterQuery, today: NaiveDate) -> Self {
        let selected_date = match query.date.as_deref().map(str::trim) {
            None | Some("") => Some(today),
            Some(raw) => {
                let parsed = parse_date_param(raw);
                if parsed.is_none() {
                    warn!(target: "discovery", date = %raw, "unparseable date parameter, matching all dates");
                }
                parsed
            }
        };

        Self {
            selected_date,
            search_query: normalize_search(query.search.as_deref()),
            category: normalize_category(query.category.as_deref()),
            page: query.page.unwrap_or(1).max(1),
        }
    }

    pub fn to_query(&self) -> FilterQuery {
        FilterQuery {
            date: self.selected_date.map(format_date_param),
            search: self.search_query.clone(),
            category: self.category.clone(),
            page: (self.page > 1).then_some(self.page),
        }
    }

    /// Parameter pairs in URL order, omitting unconstrained values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let query = self.to_query();
        let mut pairs = Vec::new();
        if let Some(date) = query.date {
            pairs.push(("date", date));
        }
        if let Some(search) = query.search {
            pairs.push(("search", search));
        }
        if let Some(category) = query.category {
            pairs.push(("type", category));
        }
        if let Some(page) = query.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}

pub fn format_date_param(date: NaiveDate) -> String {
    date.format(DATE_PARAM_FORMAT).to_string()
}

/// Accepts `01-May-2024` (month name in any case) or ISO `2024-05-01`.
pub fn parse_date_param(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_PARAM_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

pub(crate) fn normalize_search(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn normalize_category(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_param_format() {
        assert_eq!(format_date_param(day(2024, 5, 1)), "01-May-2024");
        assert_eq!(format_date_param(day(2023, 12, 25)), "25-Dec-2023");
    }

    #[test]
    fn date_param_parsing() {
        assert_eq!(parse_date_param("01-May-2024"), Some(day(2024, 5, 1)));
        assert_eq!(parse_date_param("01-may-2024"), Some(day(2024, 5, 1)));
        assert_eq!(parse_date_param("2024-05-01"), Some(day(2024, 5, 1)));
        assert_eq!(parse_date_param("31-Feb-2024"), None);
        assert_eq!(parse_date_param("yesterday"), None);
    }

    #[test]
    fn absent_date_defaults_to_today() {
        let today = day(2024, 6, 3);
        let state = FilterState::from_query(&FilterQuery::default(), today);
        assert_eq!(state, FilterState::for_date(today));
    }

    #[test]
    fn unparseable_date_disables_the_date_stage() {
        let query = FilterQuery {
            date: Some("not-a-date".to_string()),
            ..FilterQuery::default()
        };
        let state = FilterState::from_query(&query, day(2024, 6, 3));
        assert_eq!(state.selected_date, None);
    }

    #[test]
    fn blank_values_mean_no_constraint() {
        let query = FilterQuery {
            date: Some("01-May-2024".to_string()),
            search: Some("   ".to_string()),
            category: Some("".to_string()),
            page: Some(0),
        };
        let state = FilterState::from_query(&query, day(2024, 6, 3));
        assert_eq!(state.selected_date, Some(day(2024, 5, 1)));
        assert_eq!(state.search_query, None);
        assert_eq!(state.category, None);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn category_is_lower_cased() {
        let query = FilterQuery {
            category: Some("EP".to_string()),
            ..FilterQuery::default()
        };
        let state = FilterState::from_query(&query, day(2024, 6, 3));
        assert_eq!(state.category.as_deref(), Some("ep"));
    }

    #[test]
    fn query_pairs_round_trip_through_from_query() {
        let state = FilterState {
            selected_date: Some(day(2024, 5, 1)),
            search_query: Some("daft punk".to_string()),
            category: Some("album".to_string()),
            page: 2,
        };

        assert_eq!(
            state.to_query_pairs(),
            vec![
                ("date", "01-May-2024".to_string()),
                ("search", "daft punk".to_string()),
                ("type", "album".to_string()),
                ("page", "2".to_string()),
            ]
        );
        assert_eq!(FilterState::from_query(&state.to_query(), day(2000, 1, 1)), state);
    }

    #[test]
    fn query_deserializes_type_parameter() {
        let query: FilterQuery =
            serde_json::from_value(serde_json::json!({ "type": "single", "page": 3 })).unwrap();
        assert_eq!(query.category.as_deref(), Some("single"));
        assert_eq!(query.page, Some(3));
        assert_eq!(query.date, None);
    }
}
