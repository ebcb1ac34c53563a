// SPDX-License-Identifier: GPL-3.0-or-later

//! Presentation state: the current filter selection and the intents that change it.

use crate::filter::{normalize_category, normalize_search, FilterQuery, FilterState};
use crate::pipeline::{project, Page};
use chrono::{Local, NaiveDate};
use musicdate_domain::Album;

/// Holds user intent for one client session.
///
/// Every filter change sends the user back to page 1; `set_page` alone keeps
/// the other selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSession {
    state: FilterState,
}

impl FilterSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: FilterState::for_date(today),
        }
    }

    /// Restore a session from URL parameters.
    pub fn from_query(query: &FilterQuery, today: NaiveDate) -> Self {
        Self {
            state: FilterState::from_query(query, today),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.state.selected_date = Some(date);
        self.state.page = 1;
    }

    pub fn set_search(&mut self, query: Option<&str>) {
        self.state.search_query = normalize_search(query);
        self.state.page = 1;
    }

    pub fn set_category(&mut self, category: Option<&str>) {
        self.state.category = normalize_category(category);
        self.state.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.page = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.state.page = self.state.page.saturating_add(1).min(total_pages.max(1));
    }

    pub fn previous_page(&mut self) {
        self.state.page = self.state.page.saturating_sub(1).max(1);
    }

    /// Clear search and category and select today.
    pub fn reset(&mut self) {
        self.reset_to(Local::now().date_naive());
    }

    pub fn reset_to(&mut self, today: NaiveDate) {
        self.state = FilterState::for_date(today);
    }

    /// The page to render for `albums` under the current selection.
    pub fn view(&self, albums: &[Album]) -> Page<Album> {
        project(albums, &self.state)
    }

    pub fn heading(&self) -> String {
        match self.state.selected_date {
            Some(date) => date.format("%-d %B %Y").to_string(),
            None => "Select a date".to_string(),
        }
    }
}
