//! Notification command handlers.

use serde::Serialize;

use ucode_core::{Notification, ObjectFunction};

use crate::cli::{GlobalOpts, LogLevel, NotifyArgs, NotifyCommand};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Delivered {
    recipients: usize,
}

#[derive(Serialize)]
struct PushSent {
    name: String,
}

/// Chat sends need a token and at least one recipient.
fn require_chat(function: &ObjectFunction) -> Result<(), CliError> {
    let config = function.config();
    if !config.has_bot_token() {
        return Err(CliError::NoBotToken);
    }
    if config.account_ids.is_empty() {
        return Err(CliError::NoRecipients);
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    function: &ObjectFunction,
    args: NotifyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let fmt = global.output;
    let quiet = global.quiet;
    let dispatcher = function.dispatcher();

    match args.command {
        NotifyCommand::Message { text } => {
            require_chat(function)?;
            dispatcher.send_message(&text).await?;
            let delivered = Delivered {
                recipients: function.config().account_ids.len(),
            };
            output::emit(fmt, &delivered, quiet)
        }

        NotifyCommand::Log { level, text } => {
            require_chat(function)?;
            let logger = function.logger();
            let line = match level {
                LogLevel::Info => logger.info(&text),
                LogLevel::Warn => logger.warn(&text),
                LogLevel::Error => logger.error(&text),
                LogLevel::Debug => logger.debug(&text),
            };
            dispatcher.send_message(&line).await?;
            let delivered = Delivered {
                recipients: function.config().account_ids.len(),
            };
            output::emit(fmt, &delivered, quiet)
        }

        NotifyCommand::MessageV2 { text } => {
            require_chat(function)?;
            let messages = dispatcher.send_message_v2(&text).await?;
            output::emit(fmt, &messages, quiet)
        }

        NotifyCommand::File { path, name } => {
            require_chat(function)?;
            let name = match name {
                Some(name) => name,
                None => path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| CliError::Validation {
                        field: "path".into(),
                        reason: format!("{} has no file name", path.display()),
                    })?,
            };
            let contents = tokio::fs::read(&path).await?;
            let messages = dispatcher.send_file(&contents, &name).await?;
            output::emit(fmt, &messages, quiet)
        }

        NotifyCommand::Push {
            platform,
            token,
            title,
            body,
        } => {
            let notification = Notification::new(&platform, token, title, body)?;
            let name = dispatcher.send_notification(&notification).await?;
            output::emit(fmt, &PushSent { name }, quiet)
        }
    }
}
