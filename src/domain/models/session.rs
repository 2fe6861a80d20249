use tracing::{debug, info};
use uuid::Uuid;

use super::{Role, Turn};

/// An identified conversation and its ordered transcript.
///
/// The transcript is replayed verbatim to the upstream endpoint on every
/// call, so insertion order is significant and turns are never edited.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: String,
    transcript: Vec<Turn>,
}

impl ConversationSession {
    /// Uses `id` verbatim when present and non-empty, otherwise generates one.
    pub fn create(id: Option<&str>) -> Self {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        debug!("Created session {}", id);
        Self {
            id,
            transcript: Vec::new(),
        }
    }

    /// Replaces the identifier and discards the transcript.
    pub fn switch(&mut self, new_id: impl Into<String>) {
        self.id = new_id.into();
        self.transcript.clear();
        info!("Switched to session {}", self.id);
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        info!("Cleared transcript of session {}", self.id);
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.transcript.push(Turn::new(role, text));
        debug!(
            "Session {}: appended {} turn ({} total)",
            self.id,
            role,
            self.transcript.len()
        );
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::create(None)
    }
}
