// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strava_merger_web::config::Config;
use strava_merger_web::routes::create_router;
use strava_merger_web::AppState;
use tower::ServiceExt;

/// How the mock backend answers `/auth/status`.
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum AuthMode {
    Authenticated,
    /// 200 with `{"authenticated": false}`
    BodyFalse,
    Unauthorized,
}

/// How the mock backend answers `/auth/url`.
#[allow(dead_code)]
#[derive(Clone)]
pub enum AuthUrlMode {
    Json(String),
    Redirect(String),
    Fail,
}

/// Canned backend responses plus a record of what the page host sent.
pub struct MockBackend {
    pub auth: AuthMode,
    pub auth_url: AuthUrlMode,
    /// `None` answers `/activities` with a 500.
    pub activities: Option<Vec<Value>>,
    /// Stall `/activities` this long before answering.
    pub activities_delay: Option<Duration>,
    pub merge_status: StatusCode,
    pub merge_body: Value,
    pub activity_requests: AtomicUsize,
    pub merge_requests: AtomicUsize,
    pub last_merge: Mutex<Option<Value>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn authenticated(activities: Vec<Value>) -> Self {
        Self {
            auth: AuthMode::Authenticated,
            auth_url: AuthUrlMode::Json(
                "https://www.strava.com/oauth/authorize?client_id=1".to_string(),
            ),
            activities: Some(activities),
            activities_delay: None,
            merge_status: StatusCode::OK,
            merge_body: json!({ "message": "merged" }),
            activity_requests: AtomicUsize::new(0),
            merge_requests: AtomicUsize::new(0),
            last_merge: Mutex::new(None),
        }
    }

    pub fn unauthenticated(auth: AuthMode) -> Self {
        Self {
            auth,
            ..Self::authenticated(vec![activity_json(1, "Should not load", "Ride")])
        }
    }

    pub fn with_merge(mut self, status: StatusCode, body: Value) -> Self {
        self.merge_status = status;
        self.merge_body = body;
        self
    }

    pub fn with_auth_url(mut self, mode: AuthUrlMode) -> Self {
        self.auth_url = mode;
        self
    }

    pub fn with_activities_delay(mut self, delay: Duration) -> Self {
        self.activities_delay = Some(delay);
        self
    }

    pub fn activity_requests(&self) -> usize {
        self.activity_requests.load(Ordering::SeqCst)
    }

    pub fn merge_requests(&self) -> usize {
        self.merge_requests.load(Ordering::SeqCst)
    }

    pub fn last_merge(&self) -> Option<Value> {
        self.last_merge.lock().unwrap().clone()
    }
}

/// Activity as the backend lists it.
#[allow(dead_code)]
pub fn activity_json(id: u64, name: &str, activity_type: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "start_date": "2025-06-01T14:03:22+00:00",
        "type": activity_type,
        "distance": 12000.5,
        "moving_time": 2400,
        "elapsed_time": 2600,
        "total_elevation_gain": 150.0,
        "workout_type": null,
        "average_speed": 5.0,
        "max_speed": 11.2,
        "has_heartrate": false,
        "average_heartrate": null,
        "max_heartrate": null,
        "heartrate_opt_out": false,
        "display_hide_heartrate_option": false,
        "elev_high": null,
        "elev_low": null,
        "pr_count": 0,
        "total_photo_count": 1,
        "has_kudoed": false
    })
}

async fn auth_status(State(mock): State<Arc<MockBackend>>) -> Response {
    match mock.auth {
        AuthMode::Authenticated => Json(json!({ "authenticated": true })).into_response(),
        AuthMode::BodyFalse => Json(json!({ "authenticated": false })).into_response(),
        AuthMode::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        )
            .into_response(),
    }
}

async fn auth_url(State(mock): State<Arc<MockBackend>>) -> Response {
    match &mock.auth_url {
        AuthUrlMode::Json(url) => Json(json!({ "url": url })).into_response(),
        AuthUrlMode::Redirect(url) => Redirect::temporary(url).into_response(),
        AuthUrlMode::Fail => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn activities(State(mock): State<Arc<MockBackend>>) -> Response {
    mock.activity_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = mock.activities_delay {
        tokio::time::sleep(delay).await;
    }
    match &mock.activities {
        Some(list) => Json(list.clone()).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

async fn merge(State(mock): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    mock.merge_requests.fetch_add(1, Ordering::SeqCst);
    *mock.last_merge.lock().unwrap() = Some(body);
    (mock.merge_status, Json(mock.merge_body.clone())).into_response()
}

/// Serve the mock on an ephemeral port. Returns the `/api` base URL.
#[allow(dead_code)]
pub async fn spawn_backend(mock: MockBackend) -> (String, Arc<MockBackend>) {
    let mock = Arc::new(mock);
    let router = Router::new()
        .route("/api/auth/status", get(auth_status))
        .route("/api/auth/url", get(auth_url))
        .route("/api/activities", get(activities))
        .route("/api/merge", post(merge))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/api"), mock)
}

/// Test configuration for a page host pointed at `base_url`.
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        api_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

/// Create the page host pointed at `base_url`.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str) -> (Router, Arc<AppState>) {
    create_test_app_with_config(test_config(base_url))
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// Minimal cookie-keeping browser over `oneshot`. Clones share the
/// session cookie held at the time of cloning.
#[derive(Clone)]
pub struct Browser {
    app: Router,
    cookie: Option<String>,
}

/// Status, headers, and body text of one response.
pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl Page {
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

#[allow(dead_code)]
impl Browser {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> Page {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Page {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Page {
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Page {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
