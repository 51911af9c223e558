//! Analysis client: prompt the model, parse the reply, shape the result.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::GeminiConfig;
use crate::error::Result;
use crate::providers::{GeminiProvider, GenerationRequest, GenerativeModel};

use super::parser::parse_reply;
use super::prompt::{system_instruction, user_prompt};
use super::types::{AnalysisResult, GroundingMetadata};

/// Sampling temperature for analysis calls.
pub const ANALYSIS_TEMPERATURE: f32 = 1.0;

/// Output token ceiling for analysis calls.
pub const ANALYSIS_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Turns a (profession, topic) pair into an [`AnalysisResult`].
#[derive(Clone)]
pub struct AnalysisClient {
    model: Arc<dyn GenerativeModel>,
}

impl AnalysisClient {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Build a client backed by Gemini. Fails when no API key is configured.
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        let provider = GeminiProvider::from_config(config)?;
        info!(model = provider.model(), "Gemini provider initialized");
        Ok(Self::new(Arc::new(provider)))
    }

    /// Build the grounded generation request for a pair.
    pub fn build_request(profession: &str, topic: &str) -> GenerationRequest {
        GenerationRequest {
            system_instruction: system_instruction(profession),
            prompt: user_prompt(topic),
            temperature: ANALYSIS_TEMPERATURE,
            max_output_tokens: ANALYSIS_MAX_OUTPUT_TOKENS,
            web_search: true,
        }
    }

    /// Run one analysis. Model failures propagate as upstream errors; a
    /// malformed reply degrades to the parser's fallback structure.
    pub async fn analyze(&self, profession: &str, topic: &str) -> Result<AnalysisResult> {
        let reply = self
            .model
            .generate(Self::build_request(profession, topic))
            .await?;

        let (complexity, answers) = parse_reply(&reply.text).into_analysis();

        let grounding_metadata = reply
            .web_search_queries
            .filter(|queries| !queries.is_empty())
            .map(|web_search_queries| GroundingMetadata { web_search_queries });
        debug!(
            %complexity,
            grounded = grounding_metadata.is_some(),
            "Model reply structured"
        );

        Ok(AnalysisResult {
            complexity,
            answers,
            grounding_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{ComplexityLevel, MISSING_ANSWER};
    use crate::error::FivewhError;
    use crate::providers::{GenerationReply, MockGenerativeModel};

    const REPLY: &str = r#"```json
{"complexity":"advanced","answers":{"what":"A","why":"B","where":"D","when":"E","how":"F"}}
```"#;

    #[tokio::test]
    async fn test_analyze_structures_reply() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate()
            .withf(|req| {
                req.web_search
                    && req.temperature == ANALYSIS_TEMPERATURE
                    && req.max_output_tokens == ANALYSIS_MAX_OUTPUT_TOKENS
                    && req.system_instruction.contains("Chemist")
                    && req.prompt.contains("catalysis")
            })
            .times(1)
            .returning(|_| Ok(GenerationReply::text(REPLY)));

        let client = AnalysisClient::new(Arc::new(model));
        let result = client.analyze("Chemist", "catalysis").await.unwrap();
        assert_eq!(result.complexity, ComplexityLevel::Advanced);
        assert_eq!(result.answers.what, "A");
        assert_eq!(result.answers.who, MISSING_ANSWER);
        assert!(result.grounding_metadata.is_none());
    }

    #[tokio::test]
    async fn test_analyze_attaches_search_queries() {
        let mut model = MockGenerativeModel::new();
        model.expect_generate().returning(|_| {
            Ok(GenerationReply::text(r#"{"complexity":"Basic","answers":{}}"#)
                .with_web_search_queries(vec!["photosynthesis basics".into()]))
        });

        let client = AnalysisClient::new(Arc::new(model));
        let result = client.analyze("Teacher", "photosynthesis").await.unwrap();
        assert_eq!(
            result.grounding_metadata,
            Some(GroundingMetadata {
                web_search_queries: vec!["photosynthesis basics".into()]
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_drops_empty_query_list() {
        let mut model = MockGenerativeModel::new();
        model.expect_generate().returning(|_| {
            Ok(GenerationReply::text("{}").with_web_search_queries(Vec::new()))
        });

        let client = AnalysisClient::new(Arc::new(model));
        let result = client.analyze("Teacher", "photosynthesis").await.unwrap();
        assert!(result.grounding_metadata.is_none());
    }

    #[tokio::test]
    async fn test_analyze_free_text_reply_falls_back() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate()
            .returning(|_| Ok(GenerationReply::text("The sky is blue.")));

        let client = AnalysisClient::new(Arc::new(model));
        let result = client.analyze("Pilot", "sky colour").await.unwrap();
        assert_eq!(result.complexity, ComplexityLevel::Intermediate);
        assert_eq!(result.answers.what, "The sky is blue.");
    }

    #[tokio::test]
    async fn test_analyze_propagates_upstream_error() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate()
            .returning(|_| Err(FivewhError::Upstream("connection reset".into())));

        let client = AnalysisClient::new(Arc::new(model));
        let err = client.analyze("Pilot", "sky colour").await.unwrap_err();
        assert!(matches!(err, FivewhError::Upstream(ref m) if m.contains("connection reset")));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = GeminiConfig {
            api_key: None,
            ..GeminiConfig::default()
        };
        let err = AnalysisClient::from_config(&config).err().unwrap();
        assert!(matches!(err, FivewhError::Config(_)));
    }

    #[test]
    fn test_from_config_with_key() {
        let config = GeminiConfig {
            api_key: Some("test-key".into()),
            ..GeminiConfig::default()
        };
        assert!(AnalysisClient::from_config(&config).is_ok());
    }
}
