// ── Client context ──
//
// Process-wide settings read by every object operation and notification
// sender. Built once at startup and handed to `ObjectFunction` explicitly;
// only the identity, base URL and bot token have setters.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use ucode_api::TransportConfig;

pub const DEFAULT_TELEGRAM_API_URL: &str = ucode_api::telegram::DEFAULT_API_URL;
pub const DEFAULT_PUSH_API_URL: &str = ucode_api::push::DEFAULT_API_URL;

/// Settings shared by all operations.
#[derive(Clone)]
pub struct Config {
    /// Default application identity sent in `X-API-KEY`.
    pub app_id: String,
    /// Object service root, e.g. `https://api.example.com`.
    pub base_url: String,
    pub bot_token: SecretString,
    /// Chat ids notified by the Telegram senders, in order.
    pub account_ids: Vec<String>,
    /// Name used to tag outgoing messages and log lines.
    pub function_name: String,
    /// Service-account JSON for push notifications.
    pub push_credentials: Option<SecretString>,
    pub telegram_api_url: String,
    pub push_api_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            base_url: String::new(),
            bot_token: SecretString::from(String::new()),
            account_ids: Vec::new(),
            function_name: String::new(),
            push_credentials: None,
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.into(),
            push_api_url: DEFAULT_PUSH_API_URL.into(),
            timeout: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("base_url", &self.base_url)
            .field("bot_token", &"[REDACTED]")
            .field("account_ids", &self.account_ids)
            .field("function_name", &self.function_name)
            .field(
                "push_credentials",
                &self.push_credentials.as_ref().map(|_| "[REDACTED]"),
            )
            .field("telegram_api_url", &self.telegram_api_url)
            .field("push_api_url", &self.push_api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn new(app_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn set_app_id(&mut self, app_id: impl Into<String>) {
        self.app_id = app_id.into();
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn set_bot_token(&mut self, token: impl Into<String>) {
        self.bot_token = SecretString::from(token.into());
    }

    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }

    pub fn with_account_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.account_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_push_credentials(mut self, json: impl Into<String>) -> Self {
        self.push_credentials = Some(SecretString::from(json.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a bot token has been configured.
    pub fn has_bot_token(&self) -> bool {
        !self.bot_token.expose_secret().is_empty()
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            user_agent: None,
        }
    }
}
