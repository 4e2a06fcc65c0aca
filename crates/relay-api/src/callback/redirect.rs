//! Success redirect back to the front-end.
//!
//! The token travels in the URL fragment, which browsers never send to a
//! server, so it stays out of access logs on the front-end host.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::oauth::TokenResponse;

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// `<frontend_url>#access_token=..&expires_in=..&state=..` with `state`
/// percent-encoded.
pub fn fragment_redirect_url(frontend_url: &str, token: &TokenResponse, state: &str) -> String {
    format!(
        "{}#access_token={}&expires_in={}&state={}",
        frontend_url,
        token.access_token,
        token.expires_in,
        urlencoding::encode(state)
    )
}

/// 302 with caching disabled, so neither the browser nor a proxy can replay it.
pub fn found_no_store(location: String) -> Response {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, NO_CACHE.to_string()),
        ],
    )
        .into_response()
}
