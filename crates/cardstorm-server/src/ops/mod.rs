//! Operational HTTP endpoints.
//!
//! - `/health` : liveness, also feeds the health counter and latency histogram
//! - `/metrics` : Prometheus text format
//! - `/generate_high_cardinality_metrics` : see [`generate`]

pub mod generate;

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use cardstorm_core::error::{CardstormError, ClientCode};
use cardstorm_core::exposition;

use crate::app_state::AppState;

/// Error wrapper turning `CardstormError` into a JSON HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CardstormError);

impl From<CardstormError> for ApiError {
    fn from(e: CardstormError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, "request rejected");
        }
        let body = json!({
            "status": "error",
            "code": code.as_str(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub async fn health(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let store = state.store();
    store.increment_health_counter();
    let resp = (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response();
    store.observe_latency(start.elapsed());
    resp
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let store = state.store();
    // Large stores take a while to render; keep it off the async workers.
    let body = tokio::task::spawn_blocking(move || exposition::encode(&store))
        .await
        .map_err(|e| CardstormError::Internal(format!("metrics encode task failed: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
        body,
    )
        .into_response())
}
