use std::time::Duration;

use tracing::warn;

use crate::domain::UpstreamIdentity;

/// Site hosting the upstream chatbot.
pub const DEFAULT_BASE_URL: &str = "https://unlimitedai.org";
pub const DEFAULT_AJAX_PATH: &str = "/wp-admin/admin-ajax.php";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_NONCE: &str = "ed16d84167";
const DEFAULT_POST_ID: &str = "18";
const DEFAULT_BOT_ID: &str = "0";
const DEFAULT_CHATBOT_IDENTITY: &str = "shortcode";
const DEFAULT_CLIENT_ID: &str = "a5UlxWnSOp";
const DEFAULT_CHAT_ID: &str = "a5UlxWnSOp";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36 Edg/133.0.0.0";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Everything needed to reach one upstream deployment.
///
/// Read from the environment with defaults for the reference deployment:
///
/// | Variable                 | Default                     |
/// |--------------------------|-----------------------------|
/// | `RELAY_UPSTREAM_URL`     | `https://unlimitedai.org`   |
/// | `RELAY_AJAX_PATH`        | `/wp-admin/admin-ajax.php`  |
/// | `RELAY_NONCE`            | deployment nonce            |
/// | `RELAY_POST_ID`          | `18`                        |
/// | `RELAY_BOT_ID`           | `0`                         |
/// | `RELAY_CHATBOT_IDENTITY` | `shortcode`                 |
/// | `RELAY_CLIENT_ID`        | deployment client id        |
/// | `RELAY_CHAT_ID`          | deployment chat id          |
/// | `RELAY_TIMEOUT_SECS`     | `60`                        |
/// | `RELAY_USER_AGENT`       | desktop Edge user agent     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub ajax_path: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
    pub identity: UpstreamIdentity,
}

impl UpstreamConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let base_url = var("RELAY_UPSTREAM_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match lookup("RELAY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!(
                    "Invalid RELAY_TIMEOUT_SECS '{}', using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        let identity = UpstreamIdentity {
            nonce: var("RELAY_NONCE", DEFAULT_NONCE),
            post_id: var("RELAY_POST_ID", DEFAULT_POST_ID),
            site_url: base_url.clone(),
            bot_id: var("RELAY_BOT_ID", DEFAULT_BOT_ID),
            chatbot_identity: var("RELAY_CHATBOT_IDENTITY", DEFAULT_CHATBOT_IDENTITY),
            client_id: var("RELAY_CLIENT_ID", DEFAULT_CLIENT_ID),
            chat_id: var("RELAY_CHAT_ID", DEFAULT_CHAT_ID),
        };

        Self {
            base_url,
            ajax_path: var("RELAY_AJAX_PATH", DEFAULT_AJAX_PATH),
            timeout: Duration::from_secs(timeout_secs),
            user_agent: var("RELAY_USER_AGENT", DEFAULT_USER_AGENT),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            identity,
        }
    }

    /// Points the config at another site. The `url` form field follows.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        self.base_url = base.trim_end_matches('/').to_string();
        self.identity.site_url = self.base_url.clone();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.ajax_path)
    }

    pub fn origin(&self) -> &str {
        &self.base_url
    }

    pub fn referer(&self) -> String {
        format!("{}/", self.base_url)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
