//! Chat session store
//!
//! Holds one chat transcript per browser session, keyed by an opaque id the
//! page keeps. Nothing is written to disk: transcripts live until the user
//! clears them or they sit idle longer than the TTL.

use crate::gemini::ChatSession;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Opaque identifier of a browser session
pub type SessionId = String;

/// A chat transcript plus the time it was last touched
///
/// The activity clock lives outside the transcript mutex so it can be
/// refreshed while a send holds the transcript.
#[derive(Debug)]
pub struct SessionEntry {
    /// The transcript; the mutex serialises sends within one session
    pub chat: Mutex<ChatSession>,
    created: Instant,
    /// Milliseconds after `created` of the last activity
    last_active_ms: AtomicU64,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            chat: Mutex::new(ChatSession::new()),
            created: Instant::now(),
            last_active_ms: AtomicU64::new(0),
        }
    }

    /// Mark the session as used now
    pub fn touch(&self) {
        let now = self.created.elapsed().as_millis() as u64;
        self.last_active_ms.fetch_max(now, Ordering::Relaxed);
    }

    /// Time since the session was last used
    pub fn idle_for(&self) -> Duration {
        let last = Duration::from_millis(self.last_active_ms.load(Ordering::Relaxed));
        self.created.elapsed().saturating_sub(last)
    }
}

/// Shared handle to one session
pub type SharedSession = Arc<SessionEntry>;

/// In-memory map of session id to chat transcript
///
/// Sessions are created on demand and dropped by `clear` or `sweep_expired`.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions expire after `ttl` of inactivity
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get the session for `id`, creating it if needed
    ///
    /// When `id` is `None` or blank a fresh id is generated. The session is
    /// touched while the map lock is held, so a concurrent sweep cannot
    /// drop it between lookup and use. Returns the id actually used together
    /// with the session handle.
    pub async fn get_or_create(&self, id: Option<&str>) -> (SessionId, SharedSession) {
        let id = match id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&id) {
                session.touch();
                debug!(session_id = %id, "Reusing existing chat session");
                return (id, session.clone());
            }
        }

        let mut sessions = self.sessions.write().await;
        // Another request may have created it between the two locks
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| {
                info!(session_id = %id, "Chat session created");
                Arc::new(SessionEntry::new())
            })
            .clone();
        session.touch();

        (id, session)
    }

    /// Look up an existing session without creating one
    #[cfg(test)]
    pub async fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove a session; returns whether it existed
    pub async fn clear(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!(session_id = %id, "Chat session cleared");
        } else {
            debug!(session_id = %id, "No chat session to clear");
        }
        removed
    }

    /// Drop every session idle longer than the TTL; returns how many went
    pub async fn sweep_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let ttl = self.ttl;

        // A locked transcript is in use, so it is not idle
        sessions.retain(|_, session| session.idle_for() < ttl || session.chat.try_lock().is_err());

        let removed = before - sessions.len();
        if removed > 0 {
            info!(
                removed = removed,
                remaining = sessions.len(),
                "Expired chat sessions removed"
            );
        }
        removed
    }

    /// Get the number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Spawn the background task that periodically sweeps expired sessions
pub fn spawn_sweeper(store: Arc<SessionStore>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            store.sweep_expired().await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_generates_id() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, _) = store.get_or_create(None).await;
        assert!(!id.is_empty());
        assert_eq!(store.session_count().await, 1);

        let (blank_id, _) = store.get_or_create(Some("  ")).await;
        assert_ne!(blank_id, id);
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, first) = store.get_or_create(Some("abc")).await;
        let (again, second) = store.get_or_create(Some("abc")).await;
        assert_eq!(id, "abc");
        assert_eq!(again, "abc");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.get_or_create(Some("abc")).await;
        assert!(store.clear("abc").await);
        assert!(!store.clear("abc").await);
        assert!(store.get("abc").await.is_none());
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let store = SessionStore::new(Duration::from_millis(20));
        store.get_or_create(Some("old")).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        store.get_or_create(Some("fresh")).await;

        let removed = store.sweep_expired().await;

        assert_eq!(removed, 1);
        assert!(store.get("old").await.is_none());
        assert!(store.get("fresh").await.is_some());
    }

    #[tokio::test]
    async fn test_lookup_refreshes_idle_session_before_sweep() {
        let store = SessionStore::new(Duration::from_millis(50));
        let (_, original) = store.get_or_create(Some("returning")).await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(original.idle_for() >= Duration::from_millis(50));

        // The user comes back after the TTL but before the sweeper runs
        let (_, looked_up) = store.get_or_create(Some("returning")).await;
        let removed = store.sweep_expired().await;

        assert_eq!(removed, 0);
        let kept = store.get("returning").await.unwrap();
        assert!(Arc::ptr_eq(&kept, &looked_up));
        assert!(Arc::ptr_eq(&kept, &original));
    }

    #[tokio::test]
    async fn test_sweep_keeps_busy_sessions() {
        let store = SessionStore::new(Duration::from_millis(1));
        let (_, session) = store.get_or_create(Some("busy")).await;
        let _guard = session.chat.lock().await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(store.sweep_expired().await, 0);
        assert_eq!(store.session_count().await, 1);
    }
}
