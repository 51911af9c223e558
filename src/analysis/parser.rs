//! Tolerant parsing of model replies into the 5W1H schema.
//!
//! The model is asked for bare JSON but frequently wraps it in a fenced code
//! block or surrounds it with prose. Parsing never fails: when no JSON object
//! can be recovered the cleaned text becomes the `what` answer of a
//! [`ParsedReply::Fallback`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::{ComplexityLevel, FiveWOneH, MISSING_ANSWER};

/// Opening fence. A language tag only counts when a line break follows it.
static FENCE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?:[A-Za-z0-9_+\-]*[ \t]*\r?\n)?").unwrap());

static FENCE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*```$").unwrap());

/// Fallback answers for replies with no recoverable JSON (`what` holds the text).
const FALLBACK_WHY: &str = "Information not available in structured format";
const FALLBACK_WHO: &str = "Please try again with a more specific topic";
const FALLBACK_REST: &str = "N/A";

const ANSWER_FIELDS: [&str; 6] = ["what", "why", "who", "where", "when", "how"];

/// Answers as found in the reply. `None` means the key was missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialAnswers {
    pub what: Option<String>,
    pub why: Option<String>,
    pub who: Option<String>,
    pub r#where: Option<String>,
    pub when: Option<String>,
    pub how: Option<String>,
}

impl PartialAnswers {
    fn from_value(answers: Option<&Value>) -> Self {
        let mut out = Self::default();
        let Some(map) = answers.and_then(Value::as_object) else {
            return out;
        };
        for field in ANSWER_FIELDS {
            let text = map.get(field).and_then(answer_text);
            match field {
                "what" => out.what = text,
                "why" => out.why = text,
                "who" => out.who = text,
                "where" => out.r#where = text,
                "when" => out.when = text,
                _ => out.how = text,
            }
        }
        out
    }

    /// Fill missing keys with [`MISSING_ANSWER`]. Empty strings are kept.
    pub fn backfill(self) -> FiveWOneH {
        let fill = |v: Option<String>| v.unwrap_or_else(|| MISSING_ANSWER.to_string());
        FiveWOneH {
            what: fill(self.what),
            why: fill(self.why),
            who: fill(self.who),
            r#where: fill(self.r#where),
            when: fill(self.when),
            how: fill(self.how),
        }
    }
}

/// Outcome of parsing a raw reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// A JSON object was recovered.
    Structured {
        complexity: Option<String>,
        answers: PartialAnswers,
    },
    /// No JSON object could be recovered; holds the cleaned reply text.
    Fallback(String),
}

impl ParsedReply {
    /// Normalize complexity and backfill missing answers.
    pub fn into_analysis(self) -> (ComplexityLevel, FiveWOneH) {
        match self {
            Self::Structured {
                complexity,
                answers,
            } => {
                let level = complexity
                    .as_deref()
                    .map(ComplexityLevel::from_model_output)
                    .unwrap_or_default();
                (level, answers.backfill())
            }
            Self::Fallback(text) => (
                ComplexityLevel::Intermediate,
                FiveWOneH {
                    what: text,
                    why: FALLBACK_WHY.to_string(),
                    who: FALLBACK_WHO.to_string(),
                    r#where: FALLBACK_REST.to_string(),
                    when: FALLBACK_REST.to_string(),
                    how: FALLBACK_REST.to_string(),
                },
            ),
        }
    }
}

/// Parse a raw model reply.
///
/// 1. Trim whitespace and strip a fenced code block wrapper.
/// 2. Decode the remainder as a JSON object.
/// 3. Failing that, decode the first `{` .. last `}` span.
/// 4. Failing that, return [`ParsedReply::Fallback`] with the cleaned text.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let cleaned = strip_code_fence(raw.trim());

    if let Some(obj) = decode_object(&cleaned) {
        return structured(&obj);
    }

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            if let Some(obj) = decode_object(&cleaned[start..=end]) {
                return structured(&obj);
            }
        }
    }

    ParsedReply::Fallback(cleaned)
}

fn strip_code_fence(text: &str) -> String {
    if !text.starts_with("```") {
        return text.to_string();
    }
    let opened = FENCE_OPEN_RE.replace(text, "");
    FENCE_CLOSE_RE.replace(&opened, "").trim().to_string()
}

fn decode_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

fn structured(obj: &Value) -> ParsedReply {
    ParsedReply::Structured {
        complexity: obj.get("complexity").and_then(answer_text),
        answers: PartialAnswers::from_value(obj.get("answers")),
    }
}

/// Strings pass through; `null` counts as missing; other values keep their
/// JSON text.
fn answer_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
