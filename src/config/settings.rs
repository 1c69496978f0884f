use std::path::PathBuf;
use std::time::Duration;
use crate::errors::CityScanError;
use crate::llm::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use super::credentials::resolve_credential;
use super::types::CityScanConfig;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<PathBuf>,
}

/// Fully resolved runtime configuration, handed to constructors at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub summary_model: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub classifier_timeout: Option<Duration>,
    pub prompts_dir: Option<PathBuf>,
}

impl Settings {
    /// Merge defaults, the config file, the environment and CLI overrides.
    pub fn resolve(
        file: &CityScanConfig,
        overrides: &SettingsOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CityScanError> {
        let llm = file.llm.clone().unwrap_or_default();
        let server = file.server.clone().unwrap_or_default();
        let analysis = file.analysis.clone().unwrap_or_default();

        // A blank or unresolved value at one source falls through to the next.
        let api_key = overrides
            .api_key
            .clone()
            .filter(usable_key)
            .or_else(|| env(API_KEY_ENV).filter(usable_key))
            .or_else(|| llm.api_key.as_deref().map(resolve_credential).filter(usable_key))
            .ok_or_else(|| {
                CityScanError::Config(format!(
                    "{} is not set (use --api-key, the environment, an env file or llm.api_key)",
                    API_KEY_ENV
                ))
            })?;

        let model = overrides
            .model
            .clone()
            .or(llm.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let summary_model = llm.summary_model.unwrap_or_else(|| model.clone());

        Ok(Self {
            api_key,
            summary_model,
            model,
            base_url: llm.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            host: overrides
                .host
                .clone()
                .or(server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(server.port).unwrap_or(DEFAULT_PORT),
            upload_dir: overrides
                .upload_dir
                .clone()
                .or(server.upload_dir.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: server.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            classifier_timeout: analysis.classifier_timeout_secs.map(Duration::from_secs),
            prompts_dir: analysis.prompts_dir.map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn usable_key(key: &String) -> bool {
    !key.trim().is_empty() && !key.starts_with('$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config_str;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_with_env_key() {
        let settings = Settings::resolve(
            &CityScanConfig::default(),
            &SettingsOverrides::default(),
            |name| (name == API_KEY_ENV).then(|| "env-key".to_string()),
        )
        .unwrap();

        assert_eq!(settings.api_key, "env-key");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.summary_model, DEFAULT_MODEL);
        assert_eq!(settings.bind_addr(), "127.0.0.1:5000");
        assert_eq!(settings.upload_dir, PathBuf::from("uploads"));
        assert_eq!(settings.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(settings.classifier_timeout.is_none());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = Settings::resolve(&CityScanConfig::default(), &SettingsOverrides::default(), no_env)
            .unwrap_err();
        assert!(matches!(err, CityScanError::Config(_)));
    }

    #[test]
    fn test_unresolved_reference_is_missing() {
        let file = parse_config_str("llm:\n  api_key: $NONEXISTENT_CITYSCAN_KEY\n").unwrap();
        assert!(Settings::resolve(&file, &SettingsOverrides::default(), no_env).is_err());
    }

    #[test]
    fn test_precedence() {
        let file = parse_config_str(
            "llm:\n  model: file-model\n  summary_model: file-summary\n  api_key: file-key\n\
             server:\n  port: 7000\n  host: 0.0.0.0\n\
             analysis:\n  classifier_timeout_secs: 20\n",
        )
        .unwrap();
        let overrides = SettingsOverrides {
            model: Some("cli-model".into()),
            port: Some(9000),
            ..Default::default()
        };

        let settings = Settings::resolve(&file, &overrides, no_env).unwrap();
        assert_eq!(settings.api_key, "file-key");
        assert_eq!(settings.model, "cli-model");
        assert_eq!(settings.summary_model, "file-summary");
        assert_eq!(settings.bind_addr(), "0.0.0.0:9000");
        assert_eq!(settings.classifier_timeout, Some(Duration::from_secs(20)));

        let with_env = Settings::resolve(&file, &overrides, |_| Some("env-key".into())).unwrap();
        assert_eq!(with_env.api_key, "env-key");
    }

    #[test]
    fn test_blank_env_key_falls_through_to_file() {
        let file = parse_config_str("llm:\n  api_key: file-key\n").unwrap();
        let settings = Settings::resolve(&file, &SettingsOverrides::default(), |_| Some(String::new()))
            .unwrap();
        assert_eq!(settings.api_key, "file-key");

        let overrides = SettingsOverrides { api_key: Some("  ".into()), ..Default::default() };
        let settings = Settings::resolve(&file, &overrides, |_| Some("env-key".into())).unwrap();
        assert_eq!(settings.api_key, "env-key");
    }
}
