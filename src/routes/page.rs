// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Merger page routes.
//!
//! Actions are plain HTML form posts answered with `303 See Other` back to
//! `/`, so the page works without client-side script.

use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::error::Result;
use crate::page::home::{self, MergeOptions, CONNECT_FAILED};
use crate::page::PageView;
use crate::sessions::{SharedPage, SESSION_COOKIE};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(show_page))
        .route("/select", post(select_activity))
        .route("/merge", post(merge_selected))
        .route("/connect", get(connect))
}

/// Existing session for this browser, if the cookie names a live one.
fn existing_session(state: &AppState, jar: &CookieJar) -> Option<SharedPage> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.get(cookie.value()))
}

/// Existing session, or a new one with its cookie added to the jar.
fn session_or_create(state: &AppState, jar: CookieJar) -> Result<(CookieJar, SharedPage)> {
    if let Some(page) = existing_session(state, &jar) {
        return Ok((jar, page));
    }

    let (session_id, page) = state.sessions.create()?;
    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .build();
    Ok((jar.add(cookie), page))
}

#[derive(Deserialize)]
pub struct ShowParams {
    #[serde(default)]
    reload: Option<String>,
}

/// Render the page, mounting it on first visit or on `?reload`.
///
/// The mount claim happens under the page lock, so concurrent requests on
/// one session query the backend once.
async fn show_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<ShowParams>,
) -> Result<Response> {
    let (jar, page) = session_or_create(&state, jar)?;

    home::mount(&page, &state.api, params.reload.is_some()).await;

    let view = PageView::from_state(&*page.lock().await, &state.theme);
    Ok((jar, view).into_response())
}

#[derive(Deserialize)]
pub struct SelectForm {
    activity_id: u64,
    checked: bool,
}

async fn select_activity(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SelectForm>,
) -> Redirect {
    if let Some(page) = existing_session(&state, &jar) {
        page.lock().await.toggle(form.activity_id, form.checked);
    }
    Redirect::to("/")
}

pub const INVALID_MERGE_DETAILS: &str = "Invalid merge details";

#[derive(Deserialize, Validate)]
pub struct MergeForm {
    #[serde(default)]
    #[validate(length(
        max = 100,
        message = "Merged activity name must be at most 100 characters"
    ))]
    name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    description: Option<String>,
}

/// First human-readable message among the form's validation errors.
fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| INVALID_MERGE_DETAILS.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Invalid details become a page notice like any other merge failure.
async fn merge_selected(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<MergeForm>,
) -> Redirect {
    let Some(page) = existing_session(&state, &jar) else {
        return Redirect::to("/");
    };

    if let Err(errors) = form.validate() {
        tracing::debug!(error = %errors, "Rejected merge form");
        page.lock().await.set_error(validation_message(&errors));
        return Redirect::to("/");
    }

    let options = MergeOptions {
        name: non_blank(form.name),
        description: non_blank(form.description),
    };
    home::merge(&page, &state.api, options).await;
    Redirect::to("/")
}

/// Send the browser to the Strava authorization URL supplied by the backend.
async fn connect(State(state): State<Arc<AppState>>, jar: CookieJar) -> Redirect {
    match state.api.auth_url().await {
        Ok(url) => {
            tracing::info!("Redirecting to Strava authorization");
            Redirect::to(&url)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to resolve authorization URL");
            if let Some(page) = existing_session(&state, &jar) {
                page.lock().await.set_error(CONNECT_FAILED);
            }
            Redirect::to("/")
        }
    }
}
