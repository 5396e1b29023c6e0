// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use chart_pipeline::application::chart_service::ChartService;
use chart_pipeline::infrastructure::config::load_charts_config;
use chart_pipeline::presentation::app_state::AppState;
use chart_pipeline::presentation::handlers::{
    health_check, render_availability, render_metric, render_multi,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("chart_pipeline=info".parse()?),
        )
        .init();

    // Load configuration
    let charts_config = load_charts_config()?;

    // Create services (application layer)
    let chart_service = ChartService::new(charts_config.defaults.clone());

    // Create application state
    let state = Arc::new(AppState { chart_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/charts/metric", post(render_metric))
        .route("/charts/availability", post(render_availability))
        .route("/charts/multi", post(render_multi))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = charts_config.server.bind_address().parse()?;
    tracing::info!("Starting chart-pipeline service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
