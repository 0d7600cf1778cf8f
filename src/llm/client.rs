use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

/// Longest slice of an error response body kept in the error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, payload: InferencePayload) -> Result<InferenceResult>;
}

pub struct HttpInferenceClient {
    client: Client,
    url: Url,
    config: LlmConfig,
}

impl HttpInferenceClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let url = Url::parse(&config.api_url).map_err(|e| {
            Error::config(format!("Invalid inference URL '{}': {}", config.api_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            config,
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::UpstreamTimeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            Error::UpstreamConnection(err.to_string())
        }
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn generate(&self, payload: InferencePayload) -> Result<InferenceResult> {
        info!("POST {} (timeout={}s)", self.url, self.config.timeout_secs);
        debug!(
            "Sending prompt with {} history turns",
            payload.conversation_history.as_array().map_or(0, Vec::len)
        );

        let mut request = self.client.post(self.url.clone()).json(&payload);
        if let Some((user, pass)) = self.config.basic_auth() {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(Error::UpstreamHttp {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let result: InferenceResult =
            serde_json::from_str(&body).map_err(|e| Error::upstream_decode(e.to_string()))?;

        debug!(
            "Received {} characters of generated text",
            result.generated_text.chars().count()
        );

        Ok(result)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
