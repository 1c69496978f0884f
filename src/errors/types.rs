use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// The image handed to the orchestrator could not be opened or decoded.
    #[error("{0}")]
    ImageLoad(String),

    /// The executive summary call failed. Not recovered from.
    #[error("Summarization failed: {0}")]
    Summarization(String),

    /// Rejected upload (missing part, empty filename, disallowed type).
    #[error("{0}")]
    Upload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
