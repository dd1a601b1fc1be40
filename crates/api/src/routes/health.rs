//! Liveness and readiness probes for the load balancer.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct ProbeResponse {
    status: &'static str,
    version: &'static str,
}

impl ProbeResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

async fn live() -> Json<ProbeResponse> {
    Json(ProbeResponse::new("ok"))
}

/// Ready once the store answers a trivial read.
async fn ready(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<ProbeResponse>) {
    match state.store.load_site_settings().await {
        Ok(_) => (StatusCode::OK, Json(ProbeResponse::new("ok"))),
        Err(e) => {
            tracing::warn!("Readiness check failed: {:#}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeResponse::new("unavailable")),
            )
        }
    }
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(live))
        .route("/health/ready", get(ready))
}
