use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{SessionHandle, SessionStore};
use crate::domain::{ConversationSession, DomainError};

struct Sessions {
    by_id: HashMap<String, SessionHandle>,
    default_id: String,
}

impl Sessions {
    fn resolve(&self, key: Option<&str>) -> String {
        match key {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => self.default_id.clone(),
        }
    }
}

fn new_handle(id: &str) -> SessionHandle {
    Arc::new(Mutex::new(ConversationSession::create(Some(id))))
}

/// Process-lifetime session table. Sessions never expire.
///
/// Entries are only created by [`SessionStore::session`] and
/// [`SessionStore::switch`]; lookups through `find` and `clear` leave the
/// table untouched.
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<Sessions>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        let default = ConversationSession::create(None);
        let default_id = default.id().to_string();
        let mut by_id = HashMap::new();
        by_id.insert(default_id.clone(), Arc::new(Mutex::new(default)));

        debug!("Session store ready, default session {}", default_id);
        Self {
            sessions: Arc::new(Mutex::new(Sessions { by_id, default_id })),
        }
    }

    /// Number of sessions currently held.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn default_id(&self) -> String {
        self.sessions.lock().await.default_id.clone()
    }

    async fn session(&self, key: Option<&str>) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;
        let id = sessions.resolve(key);

        sessions
            .by_id
            .entry(id)
            .or_insert_with_key(|id| new_handle(id))
            .clone()
    }

    async fn find(&self, key: Option<&str>) -> Option<SessionHandle> {
        let sessions = self.sessions.lock().await;
        let id = sessions.resolve(key);
        sessions.by_id.get(&id).cloned()
    }

    async fn switch(&self, key: Option<&str>, new_id: &str) -> Result<String, DomainError> {
        if new_id.is_empty() {
            return Err(DomainError::invalid_input("session_id must not be empty"));
        }

        // Re-key first so no caller can reach the session under its old id
        // once it has been switched.
        let (old_id, handle) = {
            let mut sessions = self.sessions.lock().await;
            let old_id = sessions.resolve(key);
            let handle = sessions
                .by_id
                .remove(&old_id)
                .unwrap_or_else(|| new_handle(&old_id));
            sessions.by_id.insert(new_id.to_string(), handle.clone());
            if sessions.default_id == old_id {
                sessions.default_id = new_id.to_string();
            }
            (old_id, handle)
        };

        handle.lock().await.switch(new_id);

        debug!("Session {} re-keyed as {}", old_id, new_id);
        Ok(new_id.to_string())
    }

    async fn clear(&self, key: Option<&str>) -> String {
        let (id, handle) = {
            let sessions = self.sessions.lock().await;
            let id = sessions.resolve(key);
            let handle = sessions.by_id.get(&id).cloned();
            (id, handle)
        };
        if let Some(handle) = handle {
            handle.lock().await.clear();
        }
        id
    }
}
