mod manage_session;
mod send_message;
mod session_history;

pub use manage_session::*;
pub use send_message::*;
pub use session_history::*;
