use async_trait::async_trait;

use crate::domain::{DomainError, UpstreamPayload};

/// Performs the single round trip to the upstream chat endpoint.
///
/// Implementors own the endpoint URL, header set, and timeout. The returned
/// string is the raw response body, still in its streamed line format.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Fails with [`DomainError::Upstream`] on transport errors or a
    /// non-success status, and with [`DomainError::Timeout`] when the call
    /// exceeds its deadline.
    async fn post(&self, payload: &UpstreamPayload) -> Result<String, DomainError>;
}
