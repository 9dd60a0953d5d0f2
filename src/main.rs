// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava Activity Merger web server
//!
//! Serves the merger page and relays auth, listing, and merge requests to
//! the merge backend.

use std::sync::Arc;
use std::time::Duration;
use strava_merger_web::{config::Config, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        api_base_url = %config.api_base_url,
        "Starting Strava Activity Merger"
    );

    let state = Arc::new(AppState::new(config.clone())?);
    tracing::info!(theme = state.theme.name, "Page state initialized");

    // Sweep at a quarter of the idle timeout, at most once a minute.
    let sweep_every = (config.session_idle_timeout / 4).max(Duration::from_secs(60));
    strava_merger_web::sessions::spawn_sweeper(state.clone(), sweep_every);
    tracing::info!(
        idle_secs = config.session_idle_timeout.as_secs(),
        max_sessions = config.max_sessions,
        "Session sweeper started"
    );

    let app = strava_merger_web::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured logging: JSON by default, `LOG_FORMAT=pretty`
/// for a human-readable console.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("strava_merger_web=debug,info"));

    let pretty = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if pretty {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init();
    }
}
