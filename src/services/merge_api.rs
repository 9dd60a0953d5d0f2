// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the merge backend.
//!
//! Handles:
//! - Auth status and authorization URL lookup
//! - Activity listing
//! - Merge submission, surfacing the backend's `detail` on failure

use crate::error::ApiError;
use crate::models::{
    Activity, AuthStatusResponse, AuthUrlResponse, ErrorBody, MergeRequest, MergeResponse,
};
use reqwest::{header, redirect, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Merge backend client.
///
/// Redirects are not followed so that `/auth/url` can hand the browser
/// its `Location` instead of us fetching Strava's authorize page.
#[derive(Clone)]
pub struct MergeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl MergeApiClient {
    /// Create a client for the backend rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Whether the backend holds a Strava session.
    ///
    /// Any 2xx counts as authenticated unless the body explicitly says
    /// `{"authenticated": false}`. Non-success statuses are "not
    /// authenticated", not errors.
    pub async fn auth_status(&self) -> Result<bool, ApiError> {
        let response = self.http.get(self.url("/auth/status")).send().await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Auth status: not authenticated");
            return Ok(false);
        }

        let body = response.bytes().await?;
        let authenticated = serde_json::from_slice::<AuthStatusResponse>(&body)
            .ok()
            .and_then(|s| s.authenticated)
            .unwrap_or(true);
        Ok(authenticated)
    }

    /// Resolve the Strava authorization URL the browser should visit.
    ///
    /// Accepts either a redirect (`Location`) or a JSON `{"url": ...}` body.
    pub async fn auth_url(&self) -> Result<String, ApiError> {
        let response = self.http.get(self.url("/auth/url")).send().await?;
        let status = response.status();

        if status.is_redirection() {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ApiError::Decode("redirect without Location".to_string()))?;
            let target = response
                .url()
                .join(location)
                .map_err(|e| ApiError::Decode(format!("bad Location {location:?}: {e}")))?;
            return Ok(target.to_string());
        }

        let body: AuthUrlResponse = Self::check_response_json(response).await?;
        if body.url.trim().is_empty() {
            return Err(ApiError::Decode("empty authorization URL".to_string()));
        }
        Ok(body.url)
    }

    /// List the athlete's recent activities in backend order.
    pub async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let response = self.http.get(self.url("/activities")).send().await?;
        Self::check_response_json(response).await
    }

    /// Submit a merge and return the backend's message, if it sent one.
    pub async fn merge(&self, request: &MergeRequest) -> Result<Option<String>, ApiError> {
        tracing::info!(
            activity_count = request.activity_ids.len(),
            "Submitting merge request"
        );
        let response = self
            .http
            .post(self.url("/merge"))
            .json(request)
            .send()
            .await?;

        let body: MergeResponse = Self::check_response_json(response).await?;
        Ok(body.message)
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Build a status error, keeping the backend's `detail` if the body has one.
    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend reports session not authenticated");
        } else {
            tracing::warn!(status = %status, body = %body, "Backend request failed");
        }

        ApiError::Status {
            status: status.as_u16(),
            detail,
        }
    }
}
