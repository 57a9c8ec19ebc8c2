//! Configuration for ucode functions and the `ucode` CLI.
//!
//! A TOML settings file merged with `UCODE_*` environment variables,
//! and translation to `ucode_core::Config`. Library users who build a
//! `Config` by hand never need this crate.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use ucode_core::Config;
use ucode_core::config::{DEFAULT_PUSH_API_URL, DEFAULT_TELEGRAM_API_URL};

/// Prefix of the environment variables merged over the file.
pub const ENV_PREFIX: &str = "UCODE_";

const REDACTED: &str = "[REDACTED]";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to read push credentials from {}: {source}", path.display())]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings file ───────────────────────────────────────────────────

/// On-disk settings. Every field may also come from `UCODE_<FIELD>`.
#[derive(Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Default application identity.
    #[serde(default)]
    pub app_id: String,

    /// Object service root URL.
    #[serde(default)]
    pub base_url: String,

    /// Telegram bot token (plaintext, prefer `UCODE_BOT_TOKEN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Chat ids to notify. Accepts a list or a comma-separated string.
    #[serde(default, deserialize_with = "recipients")]
    pub account_ids: Vec<String>,

    #[serde(default)]
    pub function_name: String,

    /// Path to an FCM service-account JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_credentials_file: Option<PathBuf>,

    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    #[serde(default = "default_push_api_url")]
    pub push_api_url: String,

    /// Per-request timeout; unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            base_url: String::new(),
            bot_token: None,
            account_ids: Vec::new(),
            function_name: String::new(),
            push_credentials_file: None,
            telegram_api_url: default_telegram_api_url(),
            push_api_url: default_push_api_url(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_id", &self.app_id)
            .field("base_url", &self.base_url)
            .field("bot_token", &self.bot_token.as_ref().map(|_| REDACTED))
            .field("account_ids", &self.account_ids)
            .field("function_name", &self.function_name)
            .field("push_credentials_file", &self.push_credentials_file)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("push_api_url", &self.push_api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_telegram_api_url() -> String {
    DEFAULT_TELEGRAM_API_URL.into()
}
fn default_push_api_url() -> String {
    DEFAULT_PUSH_API_URL.into()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Recipient {
    Id(i64),
    Name(String),
}

impl Recipient {
    fn into_ids(self) -> Vec<String> {
        match self {
            Self::Id(id) => vec![id.to_string()],
            Self::Name(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Recipients {
    List(Vec<Recipient>),
    One(Recipient),
}

/// Env values such as `UCODE_ACCOUNT_IDS=-100123,42` arrive as a single
/// string, and bare numeric ids arrive as integers.
fn recipients<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let ids = match Recipients::deserialize(deserializer)? {
        Recipients::List(items) => items.into_iter().flat_map(Recipient::into_ids).collect(),
        Recipients::One(item) => item.into_ids(),
    };
    Ok(ids)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "ucode", "ucode").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ucode");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Keys whose environment values are taken verbatim. The `Env` provider
/// would otherwise read `UCODE_APP_ID=007` as the integer 7.
const TEXT_KEYS: &[&str] = &[
    "app_id",
    "base_url",
    "bot_token",
    "function_name",
    "push_credentials_file",
    "telegram_api_url",
    "push_api_url",
];

/// Build the provider chain: defaults, then the file, then the environment.
pub fn settings_figment(path: &Path) -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(TEXT_KEYS));

    for (key, value) in Env::prefixed(ENV_PREFIX).only(TEXT_KEYS).iter() {
        figment = figment.merge(Serialized::default(key.as_str(), value));
    }
    figment
}

/// Load settings from `path` (or the default path) plus the environment.
/// A missing file is not an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let settings: Settings = settings_figment(&path).extract()?;
    Ok(settings)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize settings to TOML and write them to `path`, creating parents.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Settings {
    /// TOML rendering with the bot token masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut shown = self.clone();
        if shown.bot_token.is_some() {
            shown.bot_token = Some(REDACTED.into());
        }
        Ok(toml::to_string_pretty(&shown)?)
    }

    /// Build the runtime `Config`. Reads the push credentials file if one
    /// is configured. An empty `base_url` is accepted; object calls then
    /// fail with a usage error.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if !self.base_url.is_empty() {
            url::Url::parse(&self.base_url).map_err(|e| ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("invalid URL {}: {e}", self.base_url),
            })?;
        }

        let mut config = Config::new(self.app_id, self.base_url)
            .with_function_name(self.function_name)
            .with_account_ids(self.account_ids);

        if let Some(token) = self.bot_token {
            config.set_bot_token(token);
        }
        if let Some(path) = self.push_credentials_file {
            let json = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Credentials { path, source })?;
            config = config.with_push_credentials(json);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.telegram_api_url = self.telegram_api_url;
        config.push_api_url = self.push_api_url;

        Ok(config)
    }
}
