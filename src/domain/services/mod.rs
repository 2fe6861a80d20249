//! Domain services containing pure conversation logic.

mod stream_interpreter;

pub use stream_interpreter::*;
