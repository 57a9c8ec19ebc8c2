// Transport primitive
//
// One authenticated JSON request per call. Every object endpoint funnels
// through `Transport::send`; the status classification here is the only
// place that decides what counts as a backend failure.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// Marker sent in the `authorization` header on every object request.
pub const AUTHORIZATION_MARKER: &str = "API-KEY";

/// Header carrying the resolved application identity.
pub const APP_ID_HEADER: &str = "X-API-KEY";

/// Settings used to build the shared `reqwest::Client`.
///
/// No timeout is applied unless the caller sets one; latency policy belongs
/// to the caller.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a client that never follows redirects.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(
                self.user_agent
                    .clone()
                    .unwrap_or_else(|| format!("ucode-sdk/{}", env!("CARGO_PKG_VERSION"))),
            );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(Error::Transport)
    }
}

/// Thin wrapper over `reqwest::Client` issuing backend requests.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
        })
    }

    /// Wrap an existing client (tests, shared connection pools).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Serialize `body` to JSON and send it with the identity headers.
    ///
    /// `&()` serializes to the JSON `null` literal, which is what bodyless
    /// methods transmit. Any status strictly above 300 is a failure whose
    /// message is the raw response body.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        app_id: &str,
    ) -> Result<Bytes, Error> {
        let payload = serde_json::to_vec(body).map_err(Error::Serialization)?;
        debug!("{method} {url}");
        trace!(bytes = payload.len(), "request payload");

        let resp = self
            .http
            .request(method, url)
            .header("authorization", AUTHORIZATION_MARKER)
            .header(APP_ID_HEADER, app_id)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await;

        if status.as_u16() > 300 {
            return Err(match body {
                Ok(raw) => {
                    let body = String::from_utf8_lossy(&raw).into_owned();
                    Error::Backend {
                        status: status.as_u16(),
                        message: body.clone(),
                        body,
                    }
                }
                Err(read_err) => Error::Backend {
                    status: status.as_u16(),
                    body: String::new(),
                    message: read_err.to_string(),
                },
            });
        }

        let body = body?;
        trace!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body)
    }
}
