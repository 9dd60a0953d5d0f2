// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava Activity Merger: web client
//!
//! This crate serves the merger page: it checks the user's Strava
//! authorization with the merge backend, lists recent activities, and
//! submits the user's selection to the backend's merge endpoint.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod page;
pub mod routes;
pub mod services;
pub mod sessions;
pub mod time_utils;
pub mod ui;

use config::Config;
use services::MergeApiClient;
use sessions::SessionStore;
use ui::Theme;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub api: MergeApiClient,
    pub sessions: SessionStore,
    pub theme: Theme,
}

impl AppState {
    /// Build the state from configuration, wiring the backend client.
    pub fn new(config: Config) -> Result<Self, error::ApiError> {
        let api = MergeApiClient::new(&config.api_base_url, config.api_timeout)?;
        let theme = Theme::by_name(&config.theme);
        let sessions = SessionStore::new(config.session_idle_timeout, config.max_sessions);
        Ok(Self {
            config,
            api,
            sessions,
            theme,
        })
    }
}
