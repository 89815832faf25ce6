//! `/generate_high_cardinality_metrics` handler.
//!
//! Query parameters are parsed strictly: a present but malformed value is a
//! 400, never a silent fallback to the default. Absent parameters take the
//! configured defaults.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use cardstorm_core::error::{CardstormError, Result};
use cardstorm_core::generator::{self, GenerateRequest};

use crate::app_state::AppState;
use crate::config::GeneratorSection;
use crate::ops::ApiError;

const SUCCESS_MESSAGE: &str = "Metrics generated successfully. \
    Access the /metrics endpoint to view the output. \
    Subsequent calls to this endpoint will add more unique series.";

// Raw strings so a malformed value reaches our error path instead of axum's
// plain-text extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    pub series_count: Option<String>,
    pub value_range: Option<String>,
}

fn parse_u64(name: &str, raw: Option<&str>, default: u64) -> Result<u64> {
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| {
            CardstormError::BadRequest(format!("{name} must be a non-negative integer, got {s:?}"))
        }),
    }
}

impl GenerateQuery {
    pub fn into_request(self, defaults: &GeneratorSection) -> Result<GenerateRequest> {
        let series_count = parse_u64(
            "series_count",
            self.series_count.as_deref(),
            defaults.default_series_count,
        )?;
        let value_range = parse_u64(
            "value_range",
            self.value_range.as_deref(),
            defaults.default_value_range,
        )?;
        let req = GenerateRequest {
            series_count,
            value_range: value_range as f64,
            progress_every: defaults.progress_every,
        };
        req.validate()?;
        Ok(req)
    }
}

pub async fn generate_high_cardinality_metrics(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> std::result::Result<Json<Value>, ApiError> {
    let req = query.into_request(&state.cfg().generator)?;
    let store = state.store();

    // CPU-bound; keep it off the async workers. Runs to completion even if the
    // client goes away.
    let report = tokio::task::spawn_blocking(move || {
        generator::generate(&store, &req, &mut rand::thread_rng())
    })
    .await
    .map_err(|e| CardstormError::Internal(format!("generation task failed: {e}")))??;

    Ok(Json(json!({
        "status": "success",
        "generated_series_count": report.generated,
        "generation_duration_seconds": report.duration_secs_rounded(),
        "message": SUCCESS_MESSAGE,
    })))
}
