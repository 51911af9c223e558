//! Generative model providers.
//!
//! The analysis client only needs "instructions + prompt in, text out", so the
//! seam is a single-call trait rather than a chat abstraction.

pub mod gemini;

use async_trait::async_trait;

use crate::error::Result;

pub use gemini::GeminiProvider;

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Ask the model to ground its reply with live web search.
    pub web_search: bool,
}

/// Text reply from a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReply {
    pub text: String,
    /// Search queries the model issued while grounding, when reported.
    pub web_search_queries: Option<Vec<String>>,
}

impl GenerationReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            web_search_queries: None,
        }
    }

    pub fn with_web_search_queries(mut self, queries: Vec<String>) -> Self {
        self.web_search_queries = Some(queries);
        self
    }
}

/// A generative language model reachable over the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply>;
}
