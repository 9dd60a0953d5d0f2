// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3100/api";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the merge backend (no trailing slash)
    pub api_base_url: String,
    /// Server port
    pub port: u16,
    /// Upper bound for a single backend request
    pub api_timeout: Duration,
    /// Mark the session cookie `Secure` (set when served over HTTPS)
    pub cookie_secure: bool,
    /// Page theme name ("dark" or "light")
    pub theme: String,
    /// Drop page sessions unused for this long
    pub session_idle_timeout: Duration,
    /// Upper bound on live page sessions
    pub max_sessions: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            port: 8080,
            api_timeout: Duration::from_secs(30),
            cookie_secure: false,
            theme: "dark".to_string(),
            session_idle_timeout: Duration::from_secs(60 * 60),
            max_sessions: 10_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local
    /// development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = normalize_base_url(&api_base_url)?;

        let api_timeout = parse_or("API_TIMEOUT_SECS", 30)?;

        Ok(Self {
            api_base_url,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            api_timeout: Duration::from_secs(api_timeout),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
            theme: env::var("THEME").unwrap_or_else(|_| "dark".to_string()),
            session_idle_timeout: Duration::from_secs(parse_or(
                "SESSION_IDLE_SECS",
                60 * 60,
            )?),
            max_sessions: parse_or("MAX_SESSIONS", 10_000)?,
        })
    }
}

/// Parse an optional numeric variable, rejecting malformed values.
fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(name, v)),
        Err(_) => Ok(default),
    }
}

/// Validate a backend base URL and strip trailing slashes so paths can be
/// appended with a single `/`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid("API_BASE_URL", raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
