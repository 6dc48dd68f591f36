//! Wire types exchanged with the RAG backend.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST {base}/query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub question: String,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self { question: question.into() }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Body returned by `POST {base}/query`.
///
/// Both keys are required: a response missing `answer` or `sources` fails to
/// decode instead of rendering a partial page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    pub answer: String,
    pub sources: Vec<Source>,
}

/// One retrieved fragment cited by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub content: String,
    pub metadata: SourceMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceMetadata {
    #[serde(deserialize_with = "scalar_as_string")]
    pub chapter: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub section: String,
}

/// Backends commonly send chapter numbers as JSON numbers; render any scalar
/// as text and reject arrays and objects.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a scalar, found {}",
            match other {
                serde_json::Value::Array(_) => "an array",
                _ => "an object",
            }
        ))),
    }
}
