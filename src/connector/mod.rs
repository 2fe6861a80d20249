//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Upstream chat endpoint (reqwest, form-encoded POST)
//! - Session storage (in-process memory)
//! - Inbound HTTP API (axum)

pub mod adapter;
pub mod api;

pub use adapter::*;
