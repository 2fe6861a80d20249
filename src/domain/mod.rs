//! # Domain Layer
//!
//! Conversation model, upstream payload shape, and the stream interpreter.
//! This layer is independent of the HTTP client and server frameworks.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
