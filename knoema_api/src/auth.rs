//! Request signing for the Knoema API.
//!
//! The service accepts an `Authorization: Knoema {appid}:{signature}:1.2`
//! header, where the signature is an HMAC-SHA1 of the application secret keyed
//! by the current UTC hour. A signature therefore stays valid for the rest of
//! the hour it was computed in and has to be rebuilt for every request.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Header name and value pairs attached to every request.
pub type Headers = Vec<(String, String)>;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
const JSON_CONTENT_TYPE: &str = "application/json";
const HOUR_KEY_FORMAT: &str = "%d-%m-%y-%H";
const PROTOCOL_VERSION: &str = "1.2";

#[derive(Clone)]
struct Credentials {
    app_id: String,
    app_secret: String,
}

/// Produces request headers, signed when an application id and secret are set.
#[derive(Clone, Default)]
pub struct Authenticator {
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("app_id", &self.credentials.as_ref().map(|c| c.app_id.as_str()))
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Creates an authenticator. Missing or empty values select unauthenticated mode.
    pub fn new(app_id: Option<&str>, app_secret: Option<&str>) -> Self {
        let credentials = match (app_id, app_secret) {
            (Some(app_id), Some(app_secret)) if !app_id.is_empty() && !app_secret.is_empty() => {
                Some(Credentials {
                    app_id: app_id.to_string(),
                    app_secret: app_secret.to_string(),
                })
            }
            _ => None,
        };
        Self { credentials }
    }

    /// Authenticator for public endpoints; only a content type is sent.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Headers for a request sent now.
    pub fn headers(&self) -> Headers {
        self.headers_at(Utc::now())
    }

    /// Headers for a request sent at `now`.
    pub fn headers_at(&self, now: DateTime<Utc>) -> Headers {
        let mut headers = vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())];
        if let Some(credentials) = &self.credentials {
            let signature = sign(&credentials.app_secret, &hour_key(now));
            headers.push((
                AUTHORIZATION.to_string(),
                format!(
                    "Knoema {}:{}:{}",
                    credentials.app_id, signature, PROTOCOL_VERSION
                ),
            ));
        }
        headers
    }
}

/// Formats the HMAC key for the hour containing `now`, e.g. `05-03-24-14`.
pub fn hour_key(now: DateTime<Utc>) -> String {
    now.format(HOUR_KEY_FORMAT).to_string()
}

/// Base64-encoded HMAC-SHA1 of `secret` keyed by `key`.
pub fn sign(secret: &str, key: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(secret.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
