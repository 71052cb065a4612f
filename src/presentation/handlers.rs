// HTTP request handlers
use crate::domain::page::PageView;
use crate::infrastructure::http_response::{accepts_brotli, svg_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page_html::render_page;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Page load: fetch, redraw, then serve the page
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let service = &state.chart_service;
    // failures are already reflected in the summary text
    let _ = service.fetch_and_render().await;

    let (view, svg) = service.snapshot().await;
    Html(render_page(service.title(), &view, svg.as_deref()))
}

/// Current chart as SVG
pub async fn chart_svg(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let Some(svg) = state.chart_service.current_svg().await else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match svg_response(svg, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Snapshot of the page without triggering a load
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<PageView> {
    Json(state.chart_service.view().await)
}

/// Re-run the load
pub async fn refresh(State(state): State<Arc<AppState>>) -> (StatusCode, Json<PageView>) {
    let status = match state.chart_service.fetch_and_render().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(state.chart_service.view().await))
}

/// Clear upstream readings, then re-run the load
pub async fn reset(State(state): State<Arc<AppState>>) -> (StatusCode, Json<PageView>) {
    let status = match state.chart_service.reset().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(state.chart_service.view().await))
}
