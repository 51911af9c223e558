//! Native Gemini provider with Google Search grounding.
//!
//! The API key comes from [`GeminiConfig`], which already resolved
//! GEMINI_API_KEY / GOOGLE_API_KEY.
//!
//! Thinking model support: Gemini 2.5 models return parts tagged `thought: true`.
//! This provider filters those out and only returns the final non-thought text.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::GeminiConfig;
use crate::error::{FivewhError, Result};

use super::{GenerationReply, GenerationRequest, GenerativeModel};

/// Gemini v1beta REST API base.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

// ── Auth ─────────────────────────────────────────────────────────────────────

/// API key sent as the `?key=` query parameter.
pub struct GeminiAuth(String);

impl std::fmt::Debug for GeminiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GeminiAuth([REDACTED])")
    }
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// Gemini provider that speaks the `generateContent` REST API directly.
pub struct GeminiProvider {
    auth: GeminiAuth,
    model: String,
    client: Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("auth", &self.auth)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiProvider {
    /// Build a provider that authenticates with an API key.
    pub fn new_with_key(api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            auth: GeminiAuth(api_key.to_string()),
            model: model.to_string(),
            client: Self::build_client(timeout)?,
        })
    }

    /// Build from config. Fails with [`FivewhError::Config`] when no key is set.
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        Self::new_with_key(
            config.require_api_key()?,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FivewhError::Config(format!("failed to build HTTP client: {}", e)))
    }

    /// Build the `generateContent` request body.
    pub fn build_request_body(request: &GenerationRequest) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": &request.prompt }]
            }],
            "systemInstruction": {
                "parts": [{ "text": &request.system_instruction }]
            },
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_output_tokens
            }
        });
        if request.web_search {
            body["tools"] = json!([{ "google_search": {} }]);
        }
        body
    }

    /// Extract final answer text from a Gemini API response.
    ///
    /// Parts tagged `"thought": true` are intermediate reasoning and skipped.
    /// If no non-thought parts exist, the thought text is returned instead.
    pub fn extract_text(response: &Value) -> Option<String> {
        let parts = response["candidates"][0]["content"]["parts"].as_array()?;

        let final_parts: Vec<&str> = parts
            .iter()
            .filter(|p| !p["thought"].as_bool().unwrap_or(false))
            .filter_map(|p| p["text"].as_str())
            .collect();

        if !final_parts.is_empty() {
            return Some(final_parts.join(""));
        }

        let thought_parts: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();

        if !thought_parts.is_empty() {
            Some(thought_parts.join(""))
        } else {
            None
        }
    }

    /// Search queries from `groundingMetadata`, if the candidate reports any.
    pub fn extract_web_search_queries(response: &Value) -> Option<Vec<String>> {
        let queries = response["candidates"][0]["groundingMetadata"]["webSearchQueries"]
            .as_array()?
            .iter()
            .filter_map(|q| q.as_str().map(String::from))
            .collect();
        Some(queries)
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

/// Pull a readable message out of a Gemini error body.
fn error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string());
    let kind = match status {
        400 => "bad request",
        401 | 403 => "authentication failed",
        404 => "model not found",
        429 => "rate limited",
        500..=599 => "server error",
        _ => "unexpected status",
    };
    format!("Gemini API error ({} {}): {}", status, kind, detail)
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply> {
        let body = Self::build_request_body(&request);

        debug!(
            model = %self.model,
            web_search = request.web_search,
            "Gemini generateContent request"
        );

        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", self.auth.0.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| FivewhError::Upstream(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FivewhError::Upstream(error_message(
                status.as_u16(),
                &error_text,
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            FivewhError::Upstream(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = Self::extract_text(&json)
            .ok_or_else(|| FivewhError::Upstream("Gemini returned an empty reply".into()))?;

        let mut reply = GenerationReply::text(text);
        if let Some(queries) = Self::extract_web_search_queries(&json) {
            reply = reply.with_web_search_queries(queries);
        }
        Ok(reply)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
