// Router wiring for the page
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_svg, health_check, index, refresh, reset, summary};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    // /chart.svg encodes its own body and must stay outside CompressionLayer
    let page_routes = Router::new()
        .route("/", get(index))
        .route("/summary", get(summary))
        .route("/refresh", post(refresh))
        .route("/reset", post(reset))
        .layer(CompressionLayer::new());

    Router::new()
        .route("/healthz", get(health_check))
        .route("/chart.svg", get(chart_svg))
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
