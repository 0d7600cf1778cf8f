mod types;

pub use types::*;

use crate::{
    Result,
    config::LlmConfig,
    history,
    llm::{HttpInferenceClient, InferenceClient, InferencePayload},
};
use std::sync::Arc;
use tracing::{error, info};

/// Translates invocation events into inference calls and back.
///
/// Holds only immutable state, so one instance serves concurrent invocations.
#[derive(Clone)]
pub struct Handler {
    client: Arc<dyn InferenceClient>,
    max_new_tokens: u32,
}

impl Handler {
    pub fn new(client: Arc<dyn InferenceClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            max_new_tokens: config.max_new_tokens,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let client = HttpInferenceClient::new(config.clone())?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Runs one invocation. Every failure becomes a 500 response.
    pub async fn handle(&self, event: InvocationEvent) -> HandlerResponse {
        match self.process(event).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    kind = e.kind(),
                    upstream = e.is_upstream(),
                    "Error during inference: {}",
                    e
                );
                HandlerResponse::failure(&e)
            }
        }
    }

    async fn process(&self, event: InvocationEvent) -> Result<HandlerResponse> {
        let body = event.decode_body()?;
        let request = ChatRequest::from_body(body)?;

        info!(
            "Forwarding message with {} history turns",
            request.conversation_history.as_array().map_or(0, Vec::len)
        );

        let payload = InferencePayload {
            prompt: request.message,
            conversation_history: request.conversation_history.clone(),
            max_new_tokens: self.max_new_tokens,
        };
        let result = self.client.generate(payload).await?;

        let conversation_history = history::compose(
            request.conversation_history,
            result.conversation_history,
            &result.generated_text,
        )?;

        Ok(HandlerResponse::success(
            result.generated_text,
            conversation_history,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        llm::{InferenceResult, MockInferenceClient},
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn handler(client: MockInferenceClient) -> Handler {
        Handler::new(Arc::new(client), &LlmConfig::new("http://localhost:8000"))
    }

    fn body(response: &HandlerResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_hi_hello_scenario() {
        let mut client = MockInferenceClient::new();
        client
            .expect_generate()
            .times(1)
            .withf(|payload| {
                payload.prompt == "hi"
                    && payload.conversation_history == json!([])
                    && payload.max_new_tokens == 512
            })
            .returning(|_| Ok(InferenceResult::text("hello")));

        let response = handler(client)
            .handle(InvocationEvent::raw(r#"{"message": "hi"}"#))
            .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            body(&response),
            json!({
                "success": true,
                "response": "hello",
                "conversationHistory": [{"role": "assistant", "content": "hello"}]
            })
        );
    }

    #[tokio::test]
    async fn test_history_forwarded_unmodified() {
        let inbound = json!([
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "hello"}
        ]);
        let expected = inbound.clone();

        let mut client = MockInferenceClient::new();
        client
            .expect_generate()
            .times(1)
            .withf(move |payload| payload.conversation_history == expected)
            .returning(|_| Ok(InferenceResult::text("fine")));

        let response = handler(client)
            .handle(InvocationEvent::structured(json!({
                "message": "how are you?",
                "conversationHistory": inbound
            })))
            .await;

        assert_eq!(
            body(&response)["conversationHistory"],
            json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
                {"role": "assistant", "content": "fine"}
            ])
        );
    }

    #[tokio::test]
    async fn test_upstream_history_passed_through() {
        let mut client = MockInferenceClient::new();
        client.expect_generate().times(1).returning(|_| {
            Ok(InferenceResult {
                generated_text: "ok".to_string(),
                conversation_history: Some(json!([{"role": "system", "content": "summary"}])),
            })
        });

        let response = handler(client)
            .handle(InvocationEvent::structured(json!({
                "message": "hi",
                "conversationHistory": [{"role": "user", "content": "old"}]
            })))
            .await;

        assert_eq!(
            body(&response)["conversationHistory"],
            json!([{"role": "system", "content": "summary"}])
        );
    }

    #[tokio::test]
    async fn test_invalid_json_never_calls_upstream() {
        let mut client = MockInferenceClient::new();
        client.expect_generate().never();

        let response = handler(client)
            .handle(InvocationEvent::raw("not json"))
            .await;

        assert_eq!(response.status_code, 500);
        let body = body(&response);
        assert_eq!(body["success"], json!(false));
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to parse request body")
        );
    }

    #[tokio::test]
    async fn test_missing_message_never_calls_upstream() {
        let mut client = MockInferenceClient::new();
        client.expect_generate().never();

        let response = handler(client)
            .handle(InvocationEvent::structured(json!({"conversationHistory": []})))
            .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(body(&response)["success"], json!(false));
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_failure() {
        let mut client = MockInferenceClient::new();
        client
            .expect_generate()
            .times(1)
            .returning(|_| Err(Error::UpstreamTimeout { timeout_secs: 30 }));

        let response = handler(client)
            .handle(InvocationEvent::raw(r#"{"message": "hi"}"#))
            .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.headers, default_headers());
        assert_eq!(
            body(&response),
            json!({"success": false, "error": "Inference endpoint timed out after 30s"})
        );
    }
}
