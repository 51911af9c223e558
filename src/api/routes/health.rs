//! Health endpoint.

use axum::Json;
use serde_json::{json, Value};

/// GET /health: liveness probe, always 200.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
