//! Data model shared by the parser, client, cache and HTTP layer.

use serde::{Deserialize, Serialize};

use crate::error::{FivewhError, Result};

/// Placeholder for an answer field the model did not provide.
pub const MISSING_ANSWER: &str = "Information not available";

pub const MAX_PROFESSION_CHARS: usize = 100;
pub const MIN_TOPIC_CHARS: usize = 3;
pub const MAX_TOPIC_CHARS: usize = 2000;

/// Inferred complexity of a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Basic,
    #[default]
    Intermediate,
    Advanced,
}

impl ComplexityLevel {
    /// Lenient lookup for free-text model output. Unknown values map to
    /// [`ComplexityLevel::Intermediate`].
    pub fn from_model_output(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "BASIC" => Self::Basic,
            "ADVANCED" => Self::Advanced,
            _ => Self::Intermediate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six 5W1H answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiveWOneH {
    pub what: String,
    pub why: String,
    pub who: String,
    pub r#where: String,
    pub when: String,
    pub how: String,
}

/// Search metadata reported by a grounded model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingMetadata {
    pub web_search_queries: Vec<String>,
}

/// A structured analysis; the unit stored in the result cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub complexity: ComplexityLevel,
    pub answers: FiveWOneH,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Incoming analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub profession: String,
    pub topic: String,
}

impl AnalysisRequest {
    pub fn new(profession: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            profession: profession.into(),
            topic: topic.into(),
        }
    }

    /// Reject blank fields and lengths outside the accepted bounds.
    ///
    /// Lengths are counted in characters of the untrimmed input.
    pub fn validate(&self) -> Result<()> {
        if self.profession.trim().is_empty() {
            return Err(FivewhError::InvalidInput(
                "Profession cannot be empty".into(),
            ));
        }
        if self.topic.trim().is_empty() {
            return Err(FivewhError::InvalidInput("Topic cannot be empty".into()));
        }

        let profession_len = self.profession.chars().count();
        if profession_len > MAX_PROFESSION_CHARS {
            return Err(FivewhError::InvalidInput(format!(
                "Profession must be at most {MAX_PROFESSION_CHARS} characters (got {profession_len})"
            )));
        }
        let topic_len = self.topic.chars().count();
        if !(MIN_TOPIC_CHARS..=MAX_TOPIC_CHARS).contains(&topic_len) {
            return Err(FivewhError::InvalidInput(format!(
                "Topic must be between {MIN_TOPIC_CHARS} and {MAX_TOPIC_CHARS} characters (got {topic_len})"
            )));
        }
        Ok(())
    }
}
