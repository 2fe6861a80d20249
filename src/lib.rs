pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatTransport, ManageSessionUseCase, RelayReply, SendMessageUseCase, SessionHandle,
    SessionHistory, SessionHistoryUseCase, SessionStore, RELAY_FAILURE_ANSWER,
};

pub use cli::Commands;

pub use connector::{AjaxChatClient, InMemorySessionStore, UpstreamConfig};

pub use domain::{
    interpret, ConversationSession, DecodedRecord, DomainError, Role, Turn, UpstreamIdentity,
    UpstreamPayload, FALLBACK_ANSWER,
};
