//! In-memory session store.
//!
//! Maps session ids to their conversation and firm settings. Each session
//! sits behind its own async mutex so turns within one session are
//! serialized while separate sessions proceed independently. Map guards are
//! never held across `.await`: lookups clone the `Arc` out first.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use finchat_types::chat::{FirmSettings, SessionInfo};

use super::conversation::ConversationState;

/// Mutable state of one session.
#[derive(Debug)]
pub struct SessionState {
    pub id: Uuid,
    pub conversation: ConversationState,
    pub settings: FirmSettings,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionState {
    fn new(id: Uuid, settings: FirmSettings) -> Self {
        let now = Utc::now();
        Self {
            id,
            conversation: ConversationState::new(),
            settings,
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            created_at: self.created_at,
            last_active_at: self.last_active_at,
            message_count: self.conversation.len(),
            settings: self.settings.clone(),
        }
    }
}

pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Concurrent map of live sessions.
///
/// Cloning produces a shared view of the same sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, SessionHandle>>,
    defaults: FirmSettings,
}

impl SessionStore {
    /// Create an empty store; new sessions start with `defaults`.
    pub fn new(defaults: FirmSettings) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            defaults,
        }
    }

    /// Create a fresh session and return its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::now_v7();
        self.inner.insert(
            id,
            Arc::new(Mutex::new(SessionState::new(id, self.defaults.clone()))),
        );
        info!(session_id = %id, "Session created");
        id
    }

    /// Look up a session, creating it under `id` if it does not exist.
    pub fn get_or_create(&self, id: Uuid) -> SessionHandle {
        self.inner
            .entry(id)
            .or_insert_with(|| {
                info!(session_id = %id, "Session created on first access");
                Arc::new(Mutex::new(SessionState::new(id, self.defaults.clone())))
            })
            .value()
            .clone()
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.inner.get(id).map(|r| r.value().clone())
    }

    /// Tear down a session. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.inner.remove(id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.inner.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop sessions idle for longer than `max_idle`. Returns how many went.
    ///
    /// Sessions whose lock is currently held are mid-turn and are skipped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.inner.len();
        self.inner.retain(|id, handle| match handle.try_lock() {
            Ok(state) => {
                let keep = state.last_active_at >= cutoff;
                if !keep {
                    debug!(session_id = %id, "Evicting idle session");
                }
                keep
            }
            Err(_) => true,
        });
        before.saturating_sub(self.inner.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(FirmSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finchat_types::llm::Message;

    #[tokio::test]
    async fn get_or_create_creates_once() {
        let store = SessionStore::default();
        let id = Uuid::now_v7();

        let first = store.get_or_create(id);
        first.lock().await.conversation.append(Message::user("hi"));
        let second = store.get_or_create(id);

        assert_eq!(store.len(), 1);
        assert_eq!(second.lock().await.conversation.len(), 2);
    }

    #[tokio::test]
    async fn new_session_uses_store_defaults() {
        let defaults = FirmSettings {
            firm_name: "Acme CPA".to_string(),
            ..FirmSettings::default()
        };
        let store = SessionStore::new(defaults);
        let id = store.create();
        let handle = store.get(&id).unwrap();
        assert_eq!(handle.lock().await.settings.firm_name, "Acme CPA");
    }

    #[test]
    fn remove_tears_down_session() {
        let store = SessionStore::default();
        let id = store.create();
        assert!(store.contains(&id));
        assert!(store.remove(&id));
        assert!(!store.contains(&id));
        assert!(store.get(&id).is_none());
        assert!(!store.remove(&id));
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::default();
        let a = store.create();
        let b = store.create();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn evict_idle_drops_stale_sessions() {
        let store = SessionStore::default();
        let stale = store.create();
        let fresh = store.create();

        {
            let handle = store.get(&stale).unwrap();
            handle.lock().await.last_active_at = Utc::now() - Duration::hours(2);
        }

        let evicted = store.evict_idle(Duration::minutes(30));
        assert_eq!(evicted, 1);
        assert!(!store.contains(&stale));
        assert!(store.contains(&fresh));
    }

    #[tokio::test]
    async fn session_info_reports_counts() {
        let store = SessionStore::default();
        let id = store.create();
        let handle = store.get(&id).unwrap();
        let mut state = handle.lock().await;
        state.conversation.append(Message::user("q"));
        let info = state.info();
        assert_eq!(info.id, id);
        assert_eq!(info.message_count, 2);
    }
}
