use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body sent to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferencePayload {
    pub prompt: String,
    /// Inbound history, forwarded as received.
    #[serde(rename = "conversationHistory")]
    pub conversation_history: Value,
    pub max_new_tokens: u32,
}

/// Response body returned by the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub generated_text: String,
    /// Kept as raw JSON; `null` decodes to `None`.
    #[serde(
        rename = "conversationHistory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conversation_history: Option<Value>,
}

impl InferenceResult {
    pub fn text(generated_text: impl Into<String>) -> Self {
        Self {
            generated_text: generated_text.into(),
            conversation_history: None,
        }
    }
}
