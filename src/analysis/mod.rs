//! 5W1H analysis: data model, prompts, reply parsing and the model client.

pub mod client;
pub mod parser;
pub mod prompt;
pub mod types;

pub use client::AnalysisClient;
pub use parser::{parse_reply, ParsedReply, PartialAnswers};
pub use types::{
    AnalysisRequest, AnalysisResult, ComplexityLevel, FiveWOneH, GroundingMetadata,
    MISSING_ANSWER,
};
