// FCM HTTP v1 push client
//
// One message per call, addressed by device token. The payload shape is
// chosen by platform: Android gets a high-priority data-only message, iOS
// gets a visible alert with the default sound and background fetch enabled.

use std::collections::BTreeMap;
use std::str::FromStr;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::auth::ServiceAccount;
use crate::error::Error;

pub const DEFAULT_API_URL: &str = "https://fcm.googleapis.com";

// ── Notification value ───────────────────────────────────────────────

/// Target platform of a device token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// Parse a platform discriminator (`android` or `ios`).
    pub fn parse(raw: &str) -> Result<Self, Error> {
        Self::from_str(raw).map_err(|_| Error::UnsupportedPlatform(raw.to_owned()))
    }
}

/// A single push notification to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub platform: Platform,
    /// FCM registration token of the device.
    pub token: String,
    pub title: String,
    pub body: String,
}

impl Notification {
    /// Build a notification, rejecting unknown platforms before any I/O.
    pub fn new(
        platform: &str,
        token: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, Error> {
        Ok(Self {
            platform: Platform::parse(platform)?,
            token: token.into(),
            title: title.into(),
            body: body.into(),
        })
    }
}

// ── Wire payload ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aps {
    pub sound: String,
    #[serde(rename = "content-available")]
    pub content_available: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsConfig {
    pub headers: BTreeMap<String, String>,
    pub payload: ApnsPayload,
}

/// FCM v1 `Message` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns: Option<ApnsConfig>,
}

impl PushMessage {
    pub fn for_notification(n: &Notification) -> Self {
        match n.platform {
            Platform::Android => Self {
                token: n.token.clone(),
                data: Some(BTreeMap::from([
                    ("title".to_owned(), n.title.clone()),
                    ("body".to_owned(), n.body.clone()),
                ])),
                notification: None,
                android: Some(AndroidConfig {
                    priority: "high".into(),
                }),
                apns: None,
            },
            Platform::Ios => Self {
                token: n.token.clone(),
                data: None,
                notification: Some(Alert {
                    title: n.title.clone(),
                    body: n.body.clone(),
                }),
                android: None,
                apns: Some(ApnsConfig {
                    headers: BTreeMap::from([("apns-priority".to_owned(), "10".to_owned())]),
                    payload: ApnsPayload {
                        aps: Aps {
                            sound: "default".into(),
                            content_available: 1,
                        },
                    },
                }),
            },
        }
    }
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Deserialize)]
struct FcmErrorBody {
    error: FcmError,
}

#[derive(Deserialize)]
struct FcmError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Push client for one service account.
#[derive(Debug)]
pub struct PushClient {
    http: reqwest::Client,
    api_url: Url,
    account: ServiceAccount,
}

impl PushClient {
    /// Build a client from the service-account JSON blob.
    pub fn new(http: reqwest::Client, api_url: &str, credentials_json: &str) -> Result<Self, Error> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(api_url.to_string()));
        }
        Ok(Self {
            http,
            api_url,
            account: ServiceAccount::from_json(credentials_json)?,
        })
    }

    pub fn account(&self) -> &ServiceAccount {
        &self.account
    }

    /// `{api}/v1/projects/{project}/messages:send`
    fn send_url(&self) -> Result<Url, Error> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["v1", "projects", self.account.project_id(), "messages:send"]);
        Ok(url)
    }

    /// Send one message; returns the message name assigned by FCM.
    pub async fn send(&self, message: &PushMessage) -> Result<String, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            message: &'a PushMessage,
        }

        let token = self.account.access_token(&self.http).await?;
        let url = self.send_url()?;
        debug!(project = self.account.project_id(), "sending push message");

        let resp = self
            .http
            .post(url)
            .bearer_auth(token.token.expose_secret())
            .json(&Body { message })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = match serde_json::from_str::<FcmErrorBody>(&body) {
                Ok(FcmErrorBody { error }) => match error.status {
                    Some(code) => format!("{code}: {}", error.message),
                    None => error.message,
                },
                Err(_) => body,
            };
            return Err(Error::PushApi {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendResponse =
            serde_json::from_str(&body).map_err(|e| Error::deserialization(&e, body))?;
        Ok(sent.name)
    }
}
