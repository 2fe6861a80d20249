use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConversationSession, DomainError};

/// Shared handle to one session. Holding the lock is the per-session
/// mutual-exclusion scope for a relay call.
pub type SessionHandle = Arc<Mutex<ConversationSession>>;

/// Keyed table of conversation sessions with an implicit default entry.
///
/// A `None` or empty key always selects the default session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Identifier of the current default session.
    async fn default_id(&self) -> String;

    /// Returns the selected session, creating it under `key` if unknown.
    async fn session(&self, key: Option<&str>) -> SessionHandle;

    /// Returns the selected session without creating it.
    async fn find(&self, key: Option<&str>) -> Option<SessionHandle>;

    /// Switches the selected session to `new_id`, discarding its transcript,
    /// and re-keys it. Returns the new identifier.
    async fn switch(&self, key: Option<&str>, new_id: &str) -> Result<String, DomainError>;

    /// Empties the selected session's transcript, if it exists. Returns the
    /// identifier the key resolves to.
    async fn clear(&self, key: Option<&str>) -> String;
}
