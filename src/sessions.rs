// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local page sessions keyed by a random cookie value.
//!
//! Nothing is persisted: a restart or an unknown cookie starts a fresh
//! page. Sessions idle longer than the configured timeout are dropped by
//! a periodic sweep, and the store never holds more than `max_sessions`.

use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::page::HomePage;

pub const SESSION_COOKIE: &str = "merger_session";

const SESSION_ID_BYTES: usize = 16;

pub type SharedPage = Arc<Mutex<HomePage>>;

struct SessionEntry {
    page: SharedPage,
    last_access: Instant,
}

/// All live page sessions.
pub struct SessionStore {
    pages: DashMap<String, SessionEntry>,
    rng: SystemRandom,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            pages: DashMap::new(),
            rng: SystemRandom::new(),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Look up an existing session and mark it as recently used.
    pub fn get(&self, session_id: &str) -> Option<SharedPage> {
        self.pages.get_mut(session_id).map(|mut entry| {
            entry.last_access = Instant::now();
            entry.page.clone()
        })
    }

    /// Create a session with a fresh, unmounted page.
    ///
    /// At capacity, idle sessions are swept first and then the least
    /// recently used one is dropped.
    pub fn create(&self) -> anyhow::Result<(String, SharedPage)> {
        if self.pages.len() >= self.max_sessions {
            self.evict_idle(self.idle_timeout);
        }
        while self.pages.len() >= self.max_sessions {
            if !self.evict_least_recent() {
                break;
            }
        }

        let mut bytes = [0u8; SESSION_ID_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| anyhow::anyhow!("Failed to generate session id"))?;
        let session_id = hex::encode(bytes);

        let page = Arc::new(Mutex::new(HomePage::new()));
        self.pages.insert(
            session_id.clone(),
            SessionEntry {
                page: page.clone(),
                last_access: Instant::now(),
            },
        );
        tracing::debug!(sessions = self.pages.len(), "Page session created");
        Ok((session_id, page))
    }

    /// Drop sessions not used within `max_idle`. Returns how many went.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.pages.len();
        self.pages
            .retain(|_, entry| entry.last_access.elapsed() < max_idle);
        let evicted = before.saturating_sub(self.pages.len());
        if evicted > 0 {
            tracing::info!(evicted, remaining = self.pages.len(), "Evicted idle page sessions");
        }
        evicted
    }

    fn evict_least_recent(&self) -> bool {
        let oldest = self
            .pages
            .iter()
            .min_by_key(|entry| entry.last_access)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(session_id) => {
                self.pages.remove(&session_id);
                tracing::debug!("Session store full, dropped least recently used");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Periodically evict idle sessions for the life of the process.
pub fn spawn_sweeper(
    state: Arc<crate::AppState>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let sessions = &state.sessions;
            sessions.evict_idle(sessions.idle_timeout());
        }
    })
}
