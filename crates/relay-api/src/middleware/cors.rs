use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the CORS layer for the single allowed front-end origin
///
/// # Returns
/// A `CorsLayer` with:
/// - exactly one allowed origin
/// - methods GET and OPTIONS
/// - the Content-Type request header
///
/// An origin that isn't a valid header value leaves the layer without any
/// allowed origin, so cross-origin reads are refused rather than widened.
pub fn create_cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            tracing::warn!(%allowed_origin, error = %e, "Front-end origin is not a valid header value");
            AllowOrigin::list(Vec::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
