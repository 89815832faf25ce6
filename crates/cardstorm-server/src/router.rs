//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .route(
            "/generate_high_cardinality_metrics",
            get(ops::generate::generate_high_cardinality_metrics),
        )
        .with_state(state)
}
