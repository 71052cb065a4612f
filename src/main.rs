// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::infrastructure::config::load_chart_config;
use crate::infrastructure::http_source::HttpTemperatureSource;
use crate::infrastructure::svg_renderer::SvgChartRenderer;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_chart_config()?;

    // Create source (infrastructure layer)
    let source = Arc::new(HttpTemperatureSource::new(&config.api)?);
    let renderer = SvgChartRenderer::new(&config.chart);

    // Create service (application layer)
    let chart_service = ChartService::new(source, renderer, config.chart.clone());

    // Initial load, same as the page's first visit
    if chart_service.fetch_and_render().await.is_err() {
        tracing::warn!("Initial chart load failed, serving failure text until the next refresh");
    }

    let state = Arc::new(AppState { chart_service });
    let router = router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        "Starting thermo-chart on {} (upstream {})",
        addr,
        config.api.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
