use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::fold::FoldSimulator;

/// One browser's simulator plus bookkeeping.
#[derive(Debug, Clone)]
pub struct Session {
    pub simulator: FoldSimulator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Monotonic time of the last request on this session; drives idle eviction.
    last_seen: Instant,
}

/// In-memory session table, bounded by `max_sessions`. Cloning shares the table.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Creates an unfolded session. Idle sessions are evicted first; fails if
    /// `max_sessions` are still live after that.
    pub async fn create(&self, simulator: FoldSimulator) -> Result<(Uuid, Session), AppError> {
        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions);
        if sessions.len() >= self.max_sessions {
            return Err(AppError::SessionLimit(self.max_sessions));
        }

        let now = Utc::now();
        let session = Session {
            simulator,
            created_at: now,
            updated_at: now,
            last_seen: Instant::now(),
        };
        let id = Uuid::new_v4();
        sessions.insert(id, session.clone());

        info!(session_id = %id, live = sessions.len(), "Session created");
        Ok((id, session))
    }

    /// Reading a session counts as activity.
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live_session(&mut sessions, id)?;
        session.last_seen = Instant::now();
        Ok(session.clone())
    }

    /// Applies `f` to the session's simulator under the write lock. Returns the
    /// closure's output and a snapshot of the session taken under the same lock.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut FoldSimulator) -> T,
    ) -> Result<(T, Session), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live_session(&mut sessions, id)?;
        let out = f(&mut session.simulator);
        session.updated_at = Utc::now();
        session.last_seen = Instant::now();
        Ok((out, session.clone()))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id).ok_or_else(|| not_found(id))?;
        info!(session_id = %id, live = sessions.len(), "Session removed");
        Ok(())
    }

    /// Drops every session idle for longer than the TTL. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// An expired session that the sweep has not reached yet is treated as gone.
    fn live_session<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, Session>,
        id: Uuid,
    ) -> Result<&'a mut Session, AppError> {
        if sessions
            .get(&id)
            .is_some_and(|s| s.last_seen.elapsed() > self.idle_ttl)
        {
            sessions.remove(&id);
            info!(session_id = %id, "Session expired");
        }
        sessions.get_mut(&id).ok_or_else(|| not_found(id))
    }

    fn evict_idle_locked(&self, sessions: &mut HashMap<Uuid, Session>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen.elapsed() <= self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, live = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
