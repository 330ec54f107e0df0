use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AuthSession;

/// Live sessions keyed by the id handed to the browser.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, AuthSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: AuthSession) {
        self.sessions.write().await.insert(session.id, session);
    }

    /// Returns the session if it is still live at `now`; expired sessions
    /// are dropped.
    pub async fn get(&self, id: Uuid, now: DateTime<Utc>) -> Option<AuthSession> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&id) {
                None => return None,
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        if sessions.get(&id).is_some_and(|session| session.is_expired(now)) {
            sessions.remove(&id);
            tracing::debug!(session = %id, "Evicted expired session");
        }
        None
    }

    pub async fn update<F>(&self, id: Uuid, apply: F) -> Option<AuthSession>
    where
        F: FnOnce(&mut AuthSession),
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        apply(session);
        Some(session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Option<AuthSession> {
        self.sessions.write().await.remove(&id)
    }

    /// Drops every session expired at `now` and returns how many went.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
