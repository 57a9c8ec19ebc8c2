// Telegram Bot API client
//
// Covers the three calls the dispatcher needs: the query-string
// `sendMessage` GET, the JSON `sendMessage` POST and multipart
// `sendDocument`. Responses use the `{ ok, result, description }` envelope.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Deserialize)]
struct BotEnvelope<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

/// The bot account behind a token (`getMe`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A delivered message, as echoed back by the Bot API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
}

/// Client for one bot token.
pub struct BotClient {
    http: reqwest::Client,
    api_url: Url,
    token: SecretString,
    me: Option<BotUser>,
}

impl BotClient {
    /// Build a client without contacting Telegram.
    pub fn new(http: reqwest::Client, api_url: &str, token: SecretString) -> Result<Self, Error> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(api_url.to_string()));
        }
        Ok(Self {
            http,
            api_url,
            token,
            me: None,
        })
    }

    /// Build a client and validate the token with `getMe`.
    pub async fn connect(
        http: reqwest::Client,
        api_url: &str,
        token: SecretString,
    ) -> Result<Self, Error> {
        let mut client = Self::new(http, api_url, token)?;
        let me = client.get_me().await?;
        debug!(bot = me.username.as_deref().unwrap_or_default(), "bot token accepted");
        client.me = Some(me);
        Ok(client)
    }

    /// The bot identity, if the client was built with [`connect`](Self::connect).
    pub fn me(&self) -> Option<&BotUser> {
        self.me.as_ref()
    }

    /// `{api}/bot{token}/{method}`
    fn method_url(&self, method: &str) -> Result<Url, Error> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .push(&format!("bot{}", self.token.expose_secret()))
            .push(method);
        Ok(url)
    }

    pub async fn get_me(&self) -> Result<BotUser, Error> {
        let url = self.method_url("getMe")?;
        debug!("telegram getMe");
        let resp = self.http.get(url).send().await?;
        Self::handle(resp).await
    }

    /// `GET sendMessage?chat_id={id}&text={text}` with the chat id passed
    /// through as an opaque string.
    pub async fn send_message_query(&self, chat_id: &str, text: &str) -> Result<(), Error> {
        let url = self.method_url("sendMessage")?;
        debug!(chat_id, "telegram sendMessage (query)");
        let resp = self
            .http
            .get(url)
            .query(&[("chat_id", chat_id), ("text", text)])
            .send()
            .await?;
        let _: serde_json::Value = Self::handle(resp).await?;
        Ok(())
    }

    /// `POST sendMessage` with a JSON body.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            chat_id: i64,
            text: &'a str,
        }

        let url = self.method_url("sendMessage")?;
        debug!(chat_id, "telegram sendMessage");
        let resp = self
            .http
            .post(url)
            .json(&Body { chat_id, text })
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// Upload a file from disk as a document (`multipart/form-data`).
    pub async fn send_document(&self, chat_id: i64, path: &Path) -> Result<Message, Error> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".into());
        let contents = tokio::fs::read(path).await?;

        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", Part::bytes(contents).file_name(file_name));

        let url = self.method_url("sendDocument")?;
        debug!(chat_id, "telegram sendDocument");
        let resp = self.http.post(url).multipart(form).send().await?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        let envelope = serde_json::from_str::<BotEnvelope<T>>(&body);
        if status.as_u16() > 300 {
            let description = match envelope {
                Ok(BotEnvelope {
                    description: Some(d),
                    ..
                }) => d,
                _ if body.is_empty() => status.to_string(),
                _ => body,
            };
            return Err(Error::BotApi {
                status: status.as_u16(),
                description,
            });
        }

        match envelope {
            Ok(BotEnvelope {
                ok: true,
                result: Some(result),
                ..
            }) => Ok(result),
            Ok(env) => Err(Error::BotApi {
                status: status.as_u16(),
                description: env
                    .description
                    .unwrap_or_else(|| "response not ok".into()),
            }),
            Err(e) => Err(Error::deserialization(&e, body)),
        }
    }
}

/// Parse a configured recipient id for the structured client calls.
pub fn parse_chat_id(raw: &str) -> Result<i64, Error> {
    raw.trim()
        .parse::<i64>()
        .map_err(|source| Error::InvalidRecipient {
            id: raw.to_owned(),
            source,
        })
}
