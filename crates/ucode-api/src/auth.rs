// Service-account authentication for the push service
//
// A Google service-account JSON blob is exchanged for a short-lived OAuth2
// access token: sign an RS256 JWT assertion with the account's private key,
// then POST it to the account's `token_uri` (JWT bearer grant).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// OAuth2 scope required to send FCM messages.
pub const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion, in seconds.
const ASSERTION_TTL_SECS: u64 = 3600;

#[derive(Deserialize)]
struct ServiceAccountFile {
    project_id: String,
    #[serde(default)]
    private_key_id: Option<String>,
    private_key: String,
    client_email: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.into()
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// A parsed service account, ready to mint access tokens.
pub struct ServiceAccount {
    project_id: String,
    client_email: String,
    token_uri: String,
    key_id: Option<String>,
    key: EncodingKey,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// OAuth2 bearer token returned by the token endpoint.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: SecretString,
    pub expires_in: u64,
}

impl ServiceAccount {
    /// Parse the service-account JSON blob held in configuration.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let file: ServiceAccountFile =
            serde_json::from_str(raw).map_err(|e| Error::Credentials {
                message: format!("malformed service account JSON: {e}"),
            })?;
        let key = EncodingKey::from_rsa_pem(file.private_key.as_bytes()).map_err(|e| {
            Error::Credentials {
                message: format!("unusable private key: {e}"),
            }
        })?;
        Ok(Self {
            project_id: file.project_id,
            client_email: file.client_email,
            token_uri: file.token_uri,
            key_id: file.private_key_id,
            key,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// Signed JWT assertion for the messaging scope, issued at `now`.
    pub fn assertion(&self, now: u64) -> Result<String, Error> {
        let claims = Claims {
            iss: &self.client_email,
            scope: MESSAGING_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.key_id);
        encode(&header, &claims, &self.key).map_err(|e| Error::Credentials {
            message: format!("failed to sign assertion: {e}"),
        })
    }

    /// Exchange a fresh assertion for an access token.
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<AccessToken, Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Credentials {
                message: format!("system clock error: {e}"),
            })?
            .as_secs();
        let assertion = self.assertion(now)?;

        debug!(token_uri = %self.token_uri, "requesting push access token");
        let resp = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::PushApi {
                status: status.as_u16(),
                message: format!("token exchange failed: {body}"),
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::deserialization(&e, body))?;
        Ok(AccessToken {
            token: SecretString::from(token.access_token),
            expires_in: token.expires_in,
        })
    }
}
