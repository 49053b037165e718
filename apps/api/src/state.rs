use std::time::Duration;

use crate::config::Config;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Live simulator sessions, capped at `config.max_sessions` and evicted after
    /// `config.session_idle_secs` without a request.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionStore::new(
            config.max_sessions,
            Duration::from_secs(config.session_idle_secs),
        );
        Self { config, sessions }
    }
}
