use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::error;

pub const CORS_ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const CORS_ALLOW_METHODS: &str = "OPTIONS,POST";

/// Inbound trigger payload. Only `body` is read; every other field the
/// platform sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationEvent {
    #[serde(default)]
    pub body: Option<Value>,
}

impl InvocationEvent {
    /// Event whose body is a raw JSON string, as delivered by HTTP proxies.
    pub fn raw(body: impl Into<String>) -> Self {
        Self {
            body: Some(Value::String(body.into())),
        }
    }

    /// Event whose body has already been decoded.
    pub fn structured(body: Value) -> Self {
        Self { body: Some(body) }
    }

    /// Accepts any JSON value; non-object events simply have no body.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                body: map.remove("body"),
            },
            _ => Self::default(),
        }
    }

    /// Decodes the body: strings are parsed as JSON, anything else is used as is.
    pub fn decode_body(self) -> Result<Value> {
        match self.body {
            None | Some(Value::Null) => Err(Error::parse("No body in event")),
            Some(Value::String(raw)) => {
                serde_json::from_str(&raw).map_err(|e| Error::parse(e.to_string()))
            }
            Some(body) => Ok(body),
        }
    }
}

/// Chat message plus prior turns, extracted from a decoded body.
///
/// The history is opaque JSON; only `message` is required, and it must be a
/// string because it becomes the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Value,
}

impl ChatRequest {
    pub fn from_body(body: Value) -> Result<Self> {
        let Value::Object(mut fields) = body else {
            return Err(Error::validation("Request body must be a JSON object"));
        };

        let message = match fields.remove("message") {
            Some(Value::String(message)) => message,
            Some(_) => return Err(Error::validation("'message' must be a string")),
            None => return Err(Error::validation("Missing required field 'message'")),
        };

        let conversation_history = match fields.remove("conversationHistory") {
            None | Some(Value::Null) => Value::Array(Vec::new()),
            Some(history) => history,
        };

        Ok(Self {
            message,
            conversation_history,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
    pub response: String,
    #[serde(rename = "conversationHistory")]
    pub conversation_history: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

/// HTTP-style response handed back to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    pub fn success(response: String, conversation_history: Value) -> Self {
        Self {
            status_code: 200,
            headers: default_headers(),
            body: encode(&SuccessBody {
                success: true,
                response,
                conversation_history,
            }),
        }
    }

    pub fn failure(err: &Error) -> Self {
        Self {
            status_code: 500,
            headers: default_headers(),
            body: encode(&FailureBody {
                success: false,
                error: err.to_string(),
            }),
        }
    }

    /// Empty 200 carrying only the shared headers, for CORS preflight.
    pub fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: default_headers(),
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

pub fn default_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS),
        ("Access-Control-Allow-Methods", CORS_ALLOW_METHODS),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

fn encode<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body).unwrap_or_else(|e| {
        error!("Failed to serialize response body: {}", e);
        r#"{"success":false,"error":"Failed to serialize response"}"#.to_string()
    })
}
