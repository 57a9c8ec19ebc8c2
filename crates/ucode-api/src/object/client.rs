// Object service HTTP client
//
// Wraps `Transport` with endpoint construction, query-flag encoding and
// envelope decoding. The endpoint families live in sibling files as
// inherent methods so this module stays about request mechanics.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

use crate::error::Error;
use crate::model::Argument;
use crate::transport::Transport;

/// Query key for the business-logic bypass flag.
pub(crate) const FROM_OFS: &str = "from-ofs";
pub(crate) const BLOCK_BUILDER: &str = "block_builder";
pub(crate) const BLOCKED_LOGIN_TABLE: &str = "blocked_login_table";
pub(crate) const BLOCK_CACHED: &str = "block_cached";

/// Client for the object service, bound to one base URL and a default
/// application identity.
///
/// Every operation is a single request with no retries; the identity header
/// uses `Argument::app_id` when it is non-empty and the default otherwise.
#[derive(Debug, Clone)]
pub struct ObjectClient {
    transport: Transport,
    base_url: Url,
    app_id: String,
}

impl ObjectClient {
    pub fn new(
        transport: Transport,
        base_url: &str,
        app_id: impl Into<String>,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            transport,
            base_url,
            app_id: app_id.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The default application identity.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Identity for one call: the argument's override, else the default.
    pub fn resolve_app_id<'a>(&'a self, arg: &'a Argument) -> &'a str {
        arg.app_id_override().unwrap_or(&self.app_id)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append path segments to the base URL. Segments are percent-encoded;
    /// an empty final segment produces a trailing slash.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send and decode the body into `T`.
    pub(crate) async fn call<T, B>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        arg: &Argument,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self
            .transport
            .send(method, url, body, self.resolve_app_id(arg))
            .await?;
        serde_json::from_slice(&raw)
            .map_err(|e| Error::deserialization(&e, String::from_utf8_lossy(&raw).into_owned()))
    }

    /// Send and discard whatever the backend answers with.
    pub(crate) async fn call_discarding<B>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        arg: &Argument,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let raw = self
            .transport
            .send(method, url, body, self.resolve_app_id(arg))
            .await?;
        trace!(bytes = raw.len(), "discarding response body");
        Ok(())
    }
}

/// Extension for appending boolean query flags as `true`/`false`.
pub(crate) trait QueryFlags {
    fn flag(&mut self, key: &str, value: bool) -> &mut Self;
    fn param(&mut self, key: &str, value: &str) -> &mut Self;
}

impl QueryFlags for Url {
    fn flag(&mut self, key: &str, value: bool) -> &mut Self {
        self.query_pairs_mut()
            .append_pair(key, if value { "true" } else { "false" });
        self
    }

    fn param(&mut self, key: &str, value: &str) -> &mut Self {
        self.query_pairs_mut().append_pair(key, value);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ObjectClient {
        ObjectClient::new(Transport::with_client(reqwest::Client::new()), base, "app-1").unwrap()
    }

    #[test]
    fn endpoint_joins_segments() {
        let c = client("https://api.example.com");
        let url = c.endpoint(&["v1", "object", "orders"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/object/orders");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let c = client("https://api.example.com/gateway/");
        let url = c.endpoint(&["v2", "items", "orders", "aggregation"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/gateway/v2/items/orders/aggregation"
        );
    }

    #[test]
    fn endpoint_trailing_empty_segment_yields_slash() {
        let c = client("https://api.example.com");
        let url = c.endpoint(&["v1", "object", "orders", ""]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/object/orders/");
    }

    #[test]
    fn endpoint_escapes_slug() {
        let c = client("https://api.example.com");
        let url = c.endpoint(&["v1", "object", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/object/a%20b%2Fc");
    }

    #[test]
    fn flags_render_as_booleans() {
        let mut url = Url::parse("https://api.example.com/v1/object/orders").unwrap();
        url.flag(FROM_OFS, true).flag(BLOCK_BUILDER, false);
        assert_eq!(url.query(), Some("from-ofs=true&block_builder=false"));
    }

    #[test]
    fn resolve_app_id_prefers_override() {
        let c = client("https://api.example.com");
        assert_eq!(c.resolve_app_id(&Argument::new("t")), "app-1");
        assert_eq!(
            c.resolve_app_id(&Argument::new("t").with_app_id("app-2")),
            "app-2"
        );
        assert_eq!(c.resolve_app_id(&Argument::new("t").with_app_id("")), "app-1");
    }

    #[test]
    fn rejects_non_base_url() {
        let result = ObjectClient::new(
            Transport::with_client(reqwest::Client::new()),
            "mailto:ops@example.com",
            "app",
        );
        assert!(matches!(result, Err(Error::InvalidBaseUrl(_))));
    }
}
