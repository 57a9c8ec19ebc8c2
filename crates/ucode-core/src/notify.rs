// ── Notification dispatcher ──
//
// Fans a message or file out to `Config::account_ids` over the Telegram
// Bot API, and sends single FCM pushes. Recipients are tried strictly in
// order; the first failure ends the call and later recipients are skipped.

use std::ffi::OsStr;
use std::path::Path;

use chrono::{Local, SecondsFormat};
use secrecy::ExposeSecret;
use tracing::{debug, info};

use ucode_api::telegram::parse_chat_id;
use ucode_api::{BotClient, Message, Notification, PushClient, PushMessage};

use crate::config::Config;
use crate::error::CoreError;
use crate::logger::LOG_MARKERS;
use crate::util::contains_like;

// ── Tagging ──────────────────────────────────────────────────────────

/// Whether `text` already carries a logger level tag.
pub fn has_log_marker(text: &str) -> bool {
    contains_like(&LOG_MARKERS, text)
}

/// Tag for the query-string sender: `"{function} >>> {stamp} >>>>> {text}"`.
/// Logger lines are forwarded untagged with newlines removed.
pub fn tag_basic(function: &str, text: &str, stamp: &str) -> String {
    if has_log_marker(text) {
        text.replace('\n', "")
    } else {
        format!("{function} >>> {stamp} >>>>> {text}")
    }
}

/// Tag for the structured sender: `"{function} >>> {stamp} \n{text}"`.
/// Logger lines are forwarded as-is.
pub fn tag_enriched(function: &str, text: &str, stamp: &str) -> String {
    if has_log_marker(text) {
        text.to_owned()
    } else {
        format!("{function} >>> {stamp} \n{text}")
    }
}

fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ── Dispatcher ───────────────────────────────────────────────────────

/// Notification senders for one [`Config`].
#[derive(Debug, Clone)]
pub struct Dispatcher<'a> {
    config: &'a Config,
    http: reqwest::Client,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn bot(&self) -> Result<BotClient, CoreError> {
        Ok(BotClient::new(
            self.http.clone(),
            &self.config.telegram_api_url,
            self.config.bot_token.clone(),
        )?)
    }

    async fn connected_bot(&self) -> Result<BotClient, CoreError> {
        Ok(BotClient::connect(
            self.http.clone(),
            &self.config.telegram_api_url,
            self.config.bot_token.clone(),
        )
        .await?)
    }

    /// One `sendMessage` GET per recipient, chat id passed through verbatim.
    pub async fn send_message(&self, text: &str) -> Result<(), CoreError> {
        let text = tag_basic(&self.config.function_name, text, &timestamp());
        let bot = self.bot()?;

        for recipient in &self.config.account_ids {
            debug!(recipient = %recipient, "sending chat message");
            bot.send_message_query(recipient, &text)
                .await
                .map_err(|source| CoreError::Delivery {
                    recipient: recipient.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Validates the bot token once, then posts the message to every
    /// recipient. Recipient ids must be numeric.
    pub async fn send_message_v2(&self, text: &str) -> Result<Vec<Message>, CoreError> {
        let text = tag_enriched(&self.config.function_name, text, &timestamp());
        let bot = self.connected_bot().await?;

        let mut sent = Vec::with_capacity(self.config.account_ids.len());
        for recipient in &self.config.account_ids {
            let chat_id = parse_chat_id(recipient)?;
            let message = bot
                .send_message(chat_id, &text)
                .await
                .map_err(|source| CoreError::Delivery {
                    recipient: recipient.clone(),
                    source,
                })?;
            sent.push(message);
        }
        Ok(sent)
    }

    /// Upload `contents` as a document named `filename` to every recipient.
    ///
    /// The bytes are staged in a private temporary directory that is
    /// removed when the call returns, whatever the outcome.
    pub async fn send_file(
        &self,
        contents: &[u8],
        filename: &str,
    ) -> Result<Vec<Message>, CoreError> {
        if filename.is_empty() || Path::new(filename).file_name() != Some(OsStr::new(filename)) {
            return Err(CoreError::InvalidFileName(filename.to_owned()));
        }

        let staging = tempfile::tempdir().map_err(CoreError::Attachment)?;
        let path = staging.path().join(filename);
        tokio::fs::write(&path, contents)
            .await
            .map_err(CoreError::Attachment)?;
        debug!(path = %path.display(), bytes = contents.len(), "staged attachment");

        let bot = self.connected_bot().await?;
        let mut sent = Vec::with_capacity(self.config.account_ids.len());
        for recipient in &self.config.account_ids {
            let chat_id = parse_chat_id(recipient)?;
            let message = bot
                .send_document(chat_id, &path)
                .await
                .map_err(|source| CoreError::Delivery {
                    recipient: recipient.clone(),
                    source,
                })?;
            sent.push(message);
        }
        Ok(sent)
    }

    /// Send one push notification; returns the message name from FCM.
    pub async fn send_notification(&self, notification: &Notification) -> Result<String, CoreError> {
        let credentials = self
            .config
            .push_credentials
            .as_ref()
            .ok_or(CoreError::MissingPushCredentials)?;

        let client = PushClient::new(
            self.http.clone(),
            &self.config.push_api_url,
            credentials.expose_secret(),
        )?;
        let name = client
            .send(&PushMessage::for_notification(notification))
            .await?;
        info!(platform = %notification.platform, name = %name, "push notification sent");
        Ok(name)
    }
}
