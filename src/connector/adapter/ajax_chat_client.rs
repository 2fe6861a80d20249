use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::application::ChatTransport;
use crate::connector::adapter::UpstreamConfig;
use crate::domain::{DomainError, UpstreamPayload};

/// reqwest-backed client for the upstream's form-encoded chat endpoint.
///
/// The endpoint is undocumented and rejects requests that do not look like
/// they came from its own site, so every request carries a browser-like
/// header set with matching `origin` and `referer`. Each call is bounded by
/// the configured timeout.
pub struct AjaxChatClient {
    client: reqwest::Client,
    url: String,
}

impl AjaxChatClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, DomainError> {
        let headers = Self::default_headers(config)?;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("AjaxChatClient: {e}")))?;

        Ok(Self {
            client,
            url: config.endpoint(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn default_headers(config: &UpstreamConfig) -> Result<HeaderMap, DomainError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(header::ACCEPT_LANGUAGE, header_value(&config.accept_language)?);
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(header::ORIGIN, header_value(config.origin())?);
        headers.insert(header::REFERER, header_value(&config.referer())?);
        headers.insert(header::USER_AGENT, header_value(&config.user_agent)?);
        Ok(headers)
    }

    fn transport_error(e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::timeout(format!("AjaxChatClient: {e}"))
        } else {
            DomainError::upstream(format!("AjaxChatClient: request failed: {e}"))
        }
    }
}

fn header_value(v: &str) -> Result<HeaderValue, DomainError> {
    HeaderValue::from_str(v)
        .map_err(|e| DomainError::invalid_input(format!("invalid header value {v:?}: {e}")))
}

#[async_trait]
impl ChatTransport for AjaxChatClient {
    async fn post(&self, payload: &UpstreamPayload) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .form(payload.fields())
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("AjaxChatClient: upstream returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "AjaxChatClient: upstream returned {status}"
            )));
        }

        let body = response.text().await.map_err(Self::transport_error)?;
        debug!("AjaxChatClient: received {} bytes", body.len());
        Ok(body)
    }
}
