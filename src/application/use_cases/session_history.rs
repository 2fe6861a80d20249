use std::sync::Arc;

use serde::Serialize;

use crate::application::SessionStore;
use crate::domain::Turn;

/// Point-in-time copy of a session's transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionHistory {
    pub session_id: String,
    pub chat_history: Vec<Turn>,
}

pub struct SessionHistoryUseCase {
    session_store: Arc<dyn SessionStore>,
}

impl SessionHistoryUseCase {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }

    /// Waits for any in-flight relay call on the session to finish. An
    /// unknown key reports an empty transcript without creating a session.
    pub async fn execute(&self, session_key: Option<&str>) -> SessionHistory {
        let Some(handle) = self.session_store.find(session_key).await else {
            let session_id = match session_key {
                Some(key) if !key.is_empty() => key.to_string(),
                _ => self.session_store.default_id().await,
            };
            return SessionHistory {
                session_id,
                chat_history: Vec::new(),
            };
        };

        let session = handle.lock().await;
        SessionHistory {
            session_id: session.id().to_string(),
            chat_history: session.transcript().to_vec(),
        }
    }
}
