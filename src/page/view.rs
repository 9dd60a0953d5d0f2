// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering of the merger page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use crate::page::home::HomePage;
use crate::ui::Theme;

pub const TITLE: &str = "Strava Activity Merger";

/// One checkbox row in the activity list.
#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub id: u64,
    pub label: String,
    pub checked: bool,
}

/// Shown when the backend has no Strava session.
#[derive(Template, WebTemplate)]
#[template(path = "connect.html")]
pub struct ConnectTemplate {
    pub title: &'static str,
    pub theme_name: &'static str,
    pub theme_css: String,
    pub error: Option<String>,
}

/// Activity list, notices, and merge controls.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: &'static str,
    pub theme_name: &'static str,
    pub theme_css: String,
    pub error: Option<String>,
    pub merge_result: Option<String>,
    pub loading: bool,
    /// A backend call is in flight; the page asks the browser to refresh.
    pub busy: bool,
    pub rows: Vec<ActivityRow>,
    pub can_merge: bool,
    pub merge_label: &'static str,
    pub selected_count: usize,
}

pub enum PageView {
    Connect(ConnectTemplate),
    Home(HomeTemplate),
}

impl PageView {
    /// Build the view for the current page state.
    pub fn from_state(page: &HomePage, theme: &Theme) -> Self {
        let theme_css = theme.css_variables();

        // Until the auth check answers, show the spinner, not the connect view.
        if !page.is_authenticated() && !page.is_mounting() {
            return PageView::Connect(ConnectTemplate {
                title: TITLE,
                theme_name: theme.name,
                theme_css,
                error: page.error().map(str::to_string),
            });
        }

        let rows = page
            .activities()
            .iter()
            .map(|a| ActivityRow {
                id: a.id,
                label: a.label(),
                checked: page.is_selected(a.id),
            })
            .collect();

        PageView::Home(HomeTemplate {
            title: TITLE,
            theme_name: theme.name,
            theme_css,
            error: page.error().map(str::to_string),
            merge_result: page.merge_result().map(str::to_string),
            loading: page.is_loading() || page.is_mounting(),
            busy: page.is_loading() || page.is_mounting() || page.is_merging(),
            rows,
            can_merge: page.can_merge(),
            merge_label: if page.is_merging() {
                "Merging..."
            } else {
                "Merge Selected Activities"
            },
            selected_count: page.selected().len(),
        })
    }

    pub fn render(&self) -> askama::Result<String> {
        match self {
            PageView::Connect(t) => t.render(),
            PageView::Home(t) => t.render(),
        }
    }
}

impl IntoResponse for PageView {
    fn into_response(self) -> Response {
        match self {
            PageView::Connect(t) => t.into_response(),
            PageView::Home(t) => t.into_response(),
        }
    }
}
