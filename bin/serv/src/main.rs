use axum::{Router, middleware, routing::get};
use relay_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    relay_api::tracing::init_tracing(&config.env);
    tracing::debug!(?config, "Configuration loaded");

    let metrics_handle = relay_api::metrics::init_metrics()?;
    let bind_addr = config.bind_addr();
    let callback_path = config.callback_path.clone();

    let state = ApiState::new(config)?;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(relay_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = relay_api::router::app(state)
        .merge(metrics_app)
        .layer(trace_layer)
        .layer(middleware::from_fn(relay_api::metrics::track_metrics));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("OAuth relay listening on http://{bind_addr}{callback_path}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
