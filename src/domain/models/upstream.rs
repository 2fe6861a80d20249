use super::Turn;
use crate::domain::DomainError;

/// Fixed `action` tag the upstream dispatches chat messages on.
pub const CHAT_ACTION: &str = "wpaicg_chat_shortcode_message";

/// Deployment-specific identity fields sent with every upstream request.
///
/// These are tied to one third-party deployment and rotate over time, so
/// they are injected as configuration rather than compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamIdentity {
    /// Authentication nonce (`_wpnonce`).
    pub nonce: String,
    /// Content identifier of the page hosting the chatbot.
    pub post_id: String,
    /// Site URL the chatbot is embedded in.
    pub site_url: String,
    pub bot_id: String,
    /// Chatbot mode tag.
    pub chatbot_identity: String,
    pub client_id: String,
    pub chat_id: String,
}

/// Form fields for one upstream call, built fresh per call and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamPayload {
    fields: Vec<(&'static str, String)>,
}

impl UpstreamPayload {
    /// `transcript` must already include the turn for `message`.
    pub fn build(
        identity: &UpstreamIdentity,
        message: &str,
        transcript: &[Turn],
    ) -> Result<Self, DomainError> {
        let history = serde_json::to_string(transcript)?;

        let fields = vec![
            ("_wpnonce", identity.nonce.clone()),
            ("post_id", identity.post_id.clone()),
            ("url", identity.site_url.clone()),
            ("action", CHAT_ACTION.to_string()),
            ("message", message.to_string()),
            ("bot_id", identity.bot_id.clone()),
            ("chatbot_identity", identity.chatbot_identity.clone()),
            ("wpaicg_chat_client_id", identity.client_id.clone()),
            ("wpaicg_chat_history", history),
            ("chat_id", identity.chat_id.clone()),
        ];

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}
