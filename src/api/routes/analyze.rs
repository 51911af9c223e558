//! 5W1H analysis route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::analysis::{
    AnalysisRequest, AnalysisResult, ComplexityLevel, FiveWOneH, GroundingMetadata,
};
use crate::api::error::ApiError;
use crate::api::server::AppState;

/// Characters of the topic echoed into logs.
const TOPIC_LOG_CHARS: usize = 50;

/// Successful analysis body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeResponse {
    pub complexity: ComplexityLevel,
    pub answers: FiveWOneH,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

impl AnalyzeResponse {
    fn from_result(result: AnalysisResult, cached: bool) -> Self {
        Self {
            complexity: result.complexity,
            answers: result.answers,
            cached,
            grounding_metadata: result.grounding_metadata,
        }
    }
}

fn topic_preview(topic: &str) -> String {
    let mut preview: String = topic.chars().take(TOPIC_LOG_CHARS).collect();
    if topic.chars().count() > TOPIC_LOG_CHARS {
        preview.push_str("...");
    }
    preview
}

/// POST /analyze-topic
///
/// Validates the pair, serves from cache when possible, otherwise asks the
/// model and writes the result through to the cache.
pub async fn analyze_topic(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected analysis request body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;

    if let Err(e) = request.validate() {
        warn!("Validation error: {}", e);
        return Err(ApiError::from_analysis(e));
    }

    let AnalysisRequest { profession, topic } = request;

    let cached = state.cache.get(&profession, &topic).await.map_err(|e| {
        error!("Cache lookup failed: {}", e);
        ApiError::from_analysis(e)
    })?;
    if let Some(result) = cached {
        info!(
            profession = %profession,
            topic = %topic_preview(&topic),
            "Cache hit"
        );
        return Ok(Json(AnalyzeResponse::from_result(result, true)));
    }

    info!(
        profession = %profession,
        topic = %topic_preview(&topic),
        "Analyzing topic"
    );
    let result = state
        .analyzer
        .analyze(&profession, &topic)
        .await
        .map_err(|e| {
            error!("Error analyzing topic: {}", e);
            ApiError::from_analysis(e)
        })?;

    if let Err(e) = state.cache.set(&profession, &topic, &result).await {
        error!("Failed to cache analysis: {}", e);
        return Err(ApiError::from_analysis(e));
    }

    Ok(Json(AnalyzeResponse::from_result(result, false)))
}
