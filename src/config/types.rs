use serde::{Deserialize, Serialize};

/// On-disk YAML configuration. Every section is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CityScanConfig {
    pub llm: Option<LLMConfig>,
    pub server: Option<ServerConfig>,
    pub analysis: Option<AnalysisConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    pub model: Option<String>,
    /// Model for the executive summary; defaults to `model`.
    pub summary_model: Option<String>,
    /// Literal key or `$VAR` reference.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AnalysisConfig {
    pub classifier_timeout_secs: Option<u64>,
    pub prompts_dir: Option<String>,
}
