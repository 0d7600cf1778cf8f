use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse request body: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Inference endpoint timed out after {timeout_secs}s")]
    UpstreamTimeout { timeout_secs: u64 },

    #[error("Failed to connect to inference endpoint: {0}")]
    UpstreamConnection(String),

    #[error("Inference endpoint returned HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    #[error("Failed to decode inference response: {0}")]
    UpstreamDecode(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream_decode(msg: impl Into<String>) -> Self {
        Self::UpstreamDecode(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Parse(_) => "parse",
            Self::Validation(_) => "validation",
            Self::UpstreamTimeout { .. } => "upstream_timeout",
            Self::UpstreamConnection(_) => "upstream_connection",
            Self::UpstreamHttp { .. } => "upstream_http",
            Self::UpstreamDecode(_) => "upstream_decode",
            Self::Yaml(_) => "yaml",
            Self::Io(_) => "io",
            Self::AddrParse(_) => "addr_parse",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the failure came from the inference endpoint rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout { .. }
                | Self::UpstreamConnection(_)
                | Self::UpstreamHttp { .. }
                | Self::UpstreamDecode(_)
        )
    }
}
