// HTTP request handlers
use crate::application::chart_service::{
    AvailabilityChartFrame, AvailabilityChartRequest, MetricChartFrame, MetricChartRequest,
    MultiChartFrame, MultiChartRequest, RenderError,
};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

/// Render-input contract violation reported to the caller.
#[derive(Debug)]
pub struct ApiError(RenderError);

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected render input: {}", self.0);
        let body = Json(json!({ "error": self.0.to_string() }));
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Samples, y bounds and alert bands for a single-metric chart
pub async fn render_metric(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MetricChartRequest>,
) -> Result<Json<MetricChartFrame>, ApiError> {
    let frame = state.chart_service.render_metric(request)?;
    Ok(Json(frame))
}

/// Contiguous availability intervals for a time window
pub async fn render_availability(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AvailabilityChartRequest>,
) -> Result<Json<AvailabilityChartFrame>, ApiError> {
    let frame = state.chart_service.render_availability(request)?;
    Ok(Json(frame))
}

/// Normalized series, retired ids and shared scales for a multi-line chart
pub async fn render_multi(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MultiChartRequest>,
) -> Result<Json<MultiChartFrame>, ApiError> {
    let frame = state.chart_service.render_multi(request)?;
    Ok(Json(frame))
}
