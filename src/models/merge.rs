// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request and response bodies for the backend's auth and merge endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /merge`.
///
/// `name` and `description` are omitted when unset so the backend applies
/// its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub activity_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Successful merge response.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the backend on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of `GET /auth/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatusResponse {
    #[serde(default)]
    pub authenticated: Option<bool>,
}

/// Body of `GET /auth/url` when the backend answers with JSON instead of a
/// redirect.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_request_omits_unset_extras() {
        let req = MergeRequest {
            activity_ids: vec![3, 7],
            name: None,
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "activity_ids": [3, 7] })
        );
    }

    #[test]
    fn test_merge_request_includes_name() {
        let req = MergeRequest {
            activity_ids: vec![1, 2],
            name: Some("Saturday loop".to_string()),
            description: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["name"], "Saturday loop");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(body.detail.is_none());
    }
}
