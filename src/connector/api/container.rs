use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    ChatTransport, ManageSessionUseCase, SendMessageUseCase, SessionHistoryUseCase, SessionStore,
};
use crate::connector::{AjaxChatClient, InMemorySessionStore, UpstreamConfig};

pub struct ContainerConfig {
    pub upstream: UpstreamConfig,
}

/// Wires the upstream transport and the session store into use cases.
pub struct Container {
    transport: Arc<dyn ChatTransport>,
    session_store: Arc<dyn SessionStore>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        debug!(
            "Upstream endpoint {} (timeout {:?})",
            config.upstream.endpoint(),
            config.upstream.timeout
        );
        let transport = Arc::new(AjaxChatClient::new(&config.upstream)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Builds a container around an existing transport, e.g. a stub upstream.
    pub fn with_transport(config: ContainerConfig, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            session_store: Arc::new(InMemorySessionStore::new()),
            config,
        }
    }

    pub fn send_use_case(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(
            self.transport.clone(),
            self.session_store.clone(),
            self.config.upstream.identity.clone(),
        )
    }

    pub fn history_use_case(&self) -> SessionHistoryUseCase {
        SessionHistoryUseCase::new(self.session_store.clone())
    }

    pub fn manage_session_use_case(&self) -> ManageSessionUseCase {
        ManageSessionUseCase::new(self.session_store.clone())
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.config.upstream
    }
}
