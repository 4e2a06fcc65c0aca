use axum::{Router, http::StatusCode, middleware, response::IntoResponse, routing::get};

use crate::{
    callback,
    middleware::{cors, request_id, security_headers},
    state::ApiState,
};

pub fn router(callback_path: &str) -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(callback::routes(callback_path))
        .fallback(handler_404)
}

/// The router with the layers every deployment shares: CORS, request IDs and
/// security headers. Binaries add tracing and metrics on top.
pub fn app(state: ApiState) -> Router {
    let cors = cors::create_cors_layer(&state.config.frontend_url);
    let environment = state.config.env;

    let app = router(&state.config.callback_path)
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(request_id::request_id_middleware));

    security_headers::apply_security_headers(app, environment)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
