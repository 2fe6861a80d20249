mod chat_transport;
mod session_store;

pub use chat_transport::*;
pub use session_store::*;
