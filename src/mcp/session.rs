//! Session store.
//!
//! Sessions are opaque handles issued on `initialize` and required on every
//! other call. The store sits behind a small trait so tests can inject
//! their own; the default keeps ids in memory with a generous TTL so the
//! map stays bounded by active clients.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;
use uuid::Uuid;

/// Default session lifetime. Long enough that no well-behaved client ever
/// notices, short enough that the map does not grow without bound.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub trait SessionStore: Send + Sync {
    /// Issue a fresh, previously unseen session id.
    fn create(&self) -> String;

    /// Membership check. Expired ids are invalid.
    fn validate(&self, session_id: &str) -> bool;

    /// Drop every expired session.
    fn purge_expired(&self);
}

pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self) -> String {
        self.purge_expired();

        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.clone(), Instant::now());
        debug!("Created session {}", session_id);
        session_id
    }

    fn validate(&self, session_id: &str) -> bool {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .map(|created_at| created_at.elapsed() <= self.ttl)
            .unwrap_or(false)
    }

    fn purge_expired(&self) {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, created_at| created_at.elapsed() <= self.ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_sessions_validate() {
        let store = InMemorySessionStore::new();
        let id = store.create();
        assert!(store.validate(&id));
    }

    #[test]
    fn unknown_sessions_do_not_validate() {
        let store = InMemorySessionStore::new();
        store.create();
        assert!(!store.validate("not-a-session"));
        assert!(!store.validate(""));
    }

    #[test]
    fn sessions_are_unique() {
        let store = InMemorySessionStore::new();
        let first = store.create();
        let second = store.create();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn expired_sessions_do_not_validate() {
        let store = InMemorySessionStore::with_ttl(Duration::from_millis(10));
        let id = store.create();
        assert!(store.validate(&id));

        std::thread::sleep(Duration::from_millis(30));
        assert!(!store.validate(&id));
    }

    #[test]
    fn create_purges_expired_sessions() {
        let store = InMemorySessionStore::with_ttl(Duration::from_millis(10));
        store.create();
        store.create();
        std::thread::sleep(Duration::from_millis(30));

        store.create();
        assert_eq!(store.len(), 1);
    }
}
