//! Cache management routes.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::error::ApiError;
use crate::api::server::AppState;

/// DELETE /cache: drop every cached analysis.
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.cache.clear_all().await.map_err(|e| {
        error!("Failed to clear cache: {}", e);
        ApiError::internal(format!("Failed to clear cache: {}", e))
    })?;
    info!("Cache cleared");
    Ok(Json(json!({ "message": "Cache cleared successfully" })))
}
