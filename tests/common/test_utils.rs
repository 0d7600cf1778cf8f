use llm_relay::{config::LlmConfig, handler::HandlerResponse};
use serde_json::Value;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const GENERATE_PATH: &str = "/generate";

/// Config pointing at the mock server's generate endpoint.
pub fn llm_config_for(server: &MockServer) -> LlmConfig {
    LlmConfig::new(format!("{}{}", server.uri(), GENERATE_PATH))
}

/// URL of a local port with nothing listening on it.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, GENERATE_PATH)
}

pub fn response_body(response: &HandlerResponse) -> Value {
    serde_json::from_str(&response.body).expect("handler body should be JSON")
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
llm:
  api_url: "http://10.0.0.5:8000/generate"
  api_user: "relay"
  api_pass: "s3cret"
  timeout_secs: 60
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"
"#;
