use axum::middleware;
use relay_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    // Load configuration from Shuttle secrets
    let config = ApiConfig::from_shuttle_secrets(&secrets)
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // Shuttle installs its own tracing subscriber, so init_tracing is skipped here.
    tracing::info!("Environment: {:?}", config.env);

    let state = ApiState::new(config)?;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // No /metrics here: the platform has no scrape target for it.
    let app = relay_api::router::app(state)
        .layer(trace_layer)
        .layer(middleware::from_fn(relay_api::metrics::track_metrics));

    Ok(app.into())
}
