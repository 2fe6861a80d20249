mod ajax_chat_client;
mod in_memory_session_store;
mod upstream_config;

pub use ajax_chat_client::*;
pub use in_memory_session_store::*;
pub use upstream_config::*;
