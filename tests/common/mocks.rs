use async_trait::async_trait;
use llm_relay::{
    Error, Result,
    llm::{InferenceClient, InferencePayload, InferenceResult},
};
use std::sync::{Arc, Mutex};

/// Inference client that replays canned results and records every payload.
#[derive(Debug, Clone)]
pub struct RecordingClient {
    pub results: Arc<Mutex<Vec<InferenceResult>>>,
    pub payloads: Arc<Mutex<Vec<InferencePayload>>>,
    pub error: Option<String>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            payloads: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_results(self, results: Vec<InferenceResult>) -> Self {
        *self.results.lock().unwrap() = results;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get_payloads(&self) -> Vec<InferencePayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for RecordingClient {
    async fn generate(&self, payload: InferencePayload) -> Result<InferenceResult> {
        self.payloads.lock().unwrap().push(payload);

        if let Some(ref error) = self.error {
            return Err(Error::UpstreamConnection(error.clone()));
        }

        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            return Err(Error::internal("No more mock results available"));
        }

        Ok(results.remove(0))
    }
}

impl Default for RecordingClient {
    fn default() -> Self {
        Self::new()
    }
}
