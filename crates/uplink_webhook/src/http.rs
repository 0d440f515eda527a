use crate::metrics::{names, UNKNOWN_ROUTE};
use axum::extract::{MatchedPath, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics::histogram;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use uplink_domain::{DomainError, UplinkEnvelope, UplinkService};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UplinkService>,
    pub metrics: Option<PrometheusHandle>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(decode_uplink))
        .route("/metrics", get(metrics_snapshot))
        .layer(middleware::from_fn(track_http_metrics))
        .with_state(state)
}

async fn decode_uplink(
    State(state): State<AppState>,
    Json(envelope): Json<UplinkEnvelope>,
) -> Result<Json<Value>, ApiError> {
    let decoded = state.service.decode_uplink(&envelope).await?;
    Ok(Json(decoded))
}

async fn metrics_snapshot(State(state): State<AppState>) -> Result<String, ApiError> {
    let handle = state.metrics.as_ref().ok_or_else(|| {
        ApiError::MetricsSnapshot("prometheus recorder is not installed".to_string())
    })?;
    Ok(handle.render())
}

/// Record one latency observation per request, labeled by method, matched
/// route pattern and response status.
async fn track_http_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_ROUTE.to_string());

    let start = Instant::now();
    let response = next.run(req).await;
    let status = response.status().as_u16().to_string();

    histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "method" => method,
        "route" => route,
        "status" => status,
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Boundary error: a domain failure or a metrics snapshot failure, mapped to
/// a stable status code and machine-readable kind.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    MetricsSnapshot(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Domain(DomainError::MalformedEnvelope(_)) => {
                (StatusCode::BAD_REQUEST, "malformed_envelope")
            }
            Self::Domain(DomainError::InvalidDecoderName(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_decoder_name")
            }
            Self::Domain(DomainError::DecoderNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "decoder_not_found")
            }
            Self::Domain(DomainError::DecodeFailure(_)) => {
                (StatusCode::BAD_GATEWAY, "decode_failure")
            }
            Self::Domain(DomainError::DecodeTimeout { .. }) => {
                (StatusCode::GATEWAY_TIMEOUT, "decode_timeout")
            }
            Self::MetricsSnapshot(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "metrics_snapshot_failure")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        match self {
            Self::Domain(err) => {
                (status, Json(json!({"error": kind, "detail": err.to_string()})))
                    .into_response()
            }
            // The snapshot endpoint is plain text; keep its failure mode
            // plain text too.
            Self::MetricsSnapshot(detail) => (status, detail).into_response(),
        }
    }
}
