use std::sync::Arc;

use tracing::info;

use crate::application::SessionStore;
use crate::domain::DomainError;

/// Explicit session switch and transcript clearing.
pub struct ManageSessionUseCase {
    session_store: Arc<dyn SessionStore>,
}

impl ManageSessionUseCase {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }

    /// `new_id` is used verbatim; only an empty id is rejected.
    pub async fn switch(
        &self,
        session_key: Option<&str>,
        new_id: &str,
    ) -> Result<String, DomainError> {
        if new_id.is_empty() {
            return Err(DomainError::invalid_input("session_id must not be empty"));
        }
        self.session_store.switch(session_key, new_id).await
    }

    pub async fn clear(&self, session_key: Option<&str>) -> String {
        let id = self.session_store.clear(session_key).await;
        info!("History cleared for session {}", id);
        id
    }
}
