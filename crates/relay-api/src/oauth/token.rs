use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token payload returned by the provider on a successful exchange.
///
/// Only `access_token` and `expires_in` are forwarded to the front-end.
/// Whatever else the provider sends (refresh token, token type, ...) is kept
/// in `extra` so it can be inspected, but it never leaves the process.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenResponse {
    /// Names of the provider-specific fields, for logging.
    pub fn extra_fields(&self) -> Vec<&str> {
        self.extra.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[redacted]")
            .field("expires_in", &self.expires_in)
            .field("extra", &self.extra_fields())
            .finish()
    }
}
