// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Merger page state and the actions that drive it.
//!
//! State changes are split into `begin_*`/`finish_*` phases so the async
//! drivers at the bottom of this file can release the session lock while
//! a backend call is in flight. A render that happens meanwhile sees the
//! loading or merging flag.

use std::collections::BTreeSet;

use tokio::sync::Mutex;

use crate::error::ApiError;
use crate::models::{Activity, MergeRequest};
use crate::services::MergeApiClient;

pub const MIN_MERGE_SELECTION: usize = 2;

pub const LOAD_FAILED: &str = "Failed to load activities";
pub const MERGE_FAILED: &str = "Failed to merge activities";
pub const CONNECT_FAILED: &str = "Failed to connect to Strava";
pub const TOO_FEW_SELECTED: &str = "Please select at least 2 activities to merge";
pub const MERGE_SUCCEEDED: &str = "Activities merged";

/// Optional fields forwarded with a merge.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// UI state of the merger page for one browser session.
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    /// Bumped on every mount; results from an older mount are discarded.
    generation: u64,
    mounting: bool,
    mounted: bool,
    is_authenticated: bool,
    activities: Vec<Activity>,
    selected: BTreeSet<u64>,
    loading: bool,
    merging: bool,
    merge_result: Option<String>,
    error: Option<String>,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Auth check or initial load of a mount still running.
    pub fn is_mounting(&self) -> bool {
        self.mounting
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether results started at `generation` still apply to this page.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Claim the mount for this page, resetting its state.
    ///
    /// Returns the new generation, or `None` when a mount is already
    /// running or the page is mounted and `force` is not set.
    pub fn begin_mount(&mut self, force: bool) -> Option<u64> {
        if self.mounting || (self.mounted && !force) {
            return None;
        }
        let generation = self.generation + 1;
        *self = HomePage {
            generation,
            mounting: true,
            ..HomePage::default()
        };
        Some(generation)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn selected(&self) -> &BTreeSet<u64> {
        &self.selected
    }

    pub fn is_selected(&self, activity_id: u64) -> bool {
        self.selected.contains(&activity_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_merging(&self) -> bool {
        self.merging
    }

    pub fn merge_result(&self) -> Option<&str> {
        self.merge_result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record the outcome of the auth status check.
    /// Record the auth check. An authenticated mount stays in progress
    /// until its initial load finishes.
    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.mounted = true;
        self.is_authenticated = authenticated;
        if !authenticated {
            self.mounting = false;
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Add (`checked`) or remove an activity from the selection.
    ///
    /// Ids that are not in the loaded list are ignored; returns whether the
    /// toggle was applied.
    pub fn toggle(&mut self, activity_id: u64, checked: bool) -> bool {
        if !self.activities.iter().any(|a| a.id == activity_id) {
            tracing::debug!(activity_id, "Ignoring toggle for unknown activity");
            return false;
        }
        if checked {
            self.selected.insert(activity_id);
        } else {
            self.selected.remove(&activity_id);
        }
        true
    }

    /// Merge is allowed only with at least two selected and none in flight.
    pub fn can_merge(&self) -> bool {
        !self.merging && self.selected.len() >= MIN_MERGE_SELECTION
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Activity>, ApiError>) {
        self.loading = false;
        self.mounting = false;
        match result {
            Ok(activities) => {
                tracing::info!(count = activities.len(), "Activities loaded");
                // Drop selections that no longer refer to a listed activity.
                self.selected
                    .retain(|id| activities.iter().any(|a| a.id == *id));
                self.activities = activities;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load activities");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    /// Validate the selection and enter the merging state.
    ///
    /// Returns the request to send, or `None` when nothing should be sent.
    /// A selection below the minimum sets the validation error.
    pub fn begin_merge(&mut self, options: MergeOptions) -> Option<MergeRequest> {
        if self.merging {
            tracing::debug!("Merge already in flight");
            return None;
        }
        if self.selected.len() < MIN_MERGE_SELECTION {
            self.error = Some(TOO_FEW_SELECTED.to_string());
            return None;
        }

        self.merging = true;
        self.error = None;
        self.merge_result = None;

        Some(MergeRequest {
            activity_ids: self.selected.iter().copied().collect(),
            name: options.name,
            description: options.description,
        })
    }

    pub fn finish_merge(&mut self, result: Result<Option<String>, ApiError>) {
        self.merging = false;
        match result {
            Ok(message) => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| MERGE_SUCCEEDED.to_string());
                tracing::info!(message = %message, "Merge succeeded");
                self.merge_result = Some(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Merge failed");
                let message = err
                    .detail()
                    .filter(|d| !d.is_empty())
                    .unwrap_or(MERGE_FAILED);
                self.error = Some(message.to_string());
            }
        }
    }
}

/// Page load: check auth and load activities if authenticated.
///
/// Runs on first visit or when `force` is set; a concurrent request on the
/// same page while a mount is running does nothing.
pub async fn mount(page: &Mutex<HomePage>, api: &MergeApiClient, force: bool) {
    let Some(generation) = page.lock().await.begin_mount(force) else {
        return;
    };

    let authenticated = match api.auth_status().await {
        Ok(authenticated) => authenticated,
        Err(err) => {
            tracing::info!(error = %err, "Not authenticated");
            false
        }
    };

    {
        let mut state = page.lock().await;
        if !state.is_current(generation) {
            return;
        }
        state.set_authenticated(authenticated);
        if !authenticated {
            return;
        }
        state.begin_load();
    }

    let result = api.list_activities().await;
    let mut state = page.lock().await;
    if state.is_current(generation) {
        state.finish_load(result);
    }
}

pub async fn load_activities(page: &Mutex<HomePage>, api: &MergeApiClient) {
    let generation = {
        let mut state = page.lock().await;
        state.begin_load();
        state.generation()
    };
    let result = api.list_activities().await;
    let mut state = page.lock().await;
    if state.is_current(generation) {
        state.finish_load(result);
    }
}

/// Submit the current selection. No request is made when the selection is
/// too small or a merge is already running. The outcome is dropped if the
/// page was remounted meanwhile.
pub async fn merge(page: &Mutex<HomePage>, api: &MergeApiClient, options: MergeOptions) {
    let (request, generation) = {
        let mut state = page.lock().await;
        let Some(request) = state.begin_merge(options) else {
            return;
        };
        (request, state.generation())
    };
    let result = api.merge(&request).await;
    let mut state = page.lock().await;
    if state.is_current(generation) {
        state.finish_merge(result);
    } else {
        tracing::debug!("Page remounted during merge, dropping result");
    }
}
