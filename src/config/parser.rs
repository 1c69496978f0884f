use std::path::Path;
use crate::errors::CityScanError;
use super::types::CityScanConfig;
use super::schema::CONFIG_SCHEMA;

pub async fn parse_config(path: &Path) -> Result<CityScanConfig, CityScanError> {
    if !path.exists() {
        return Err(CityScanError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(CityScanError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<CityScanConfig, CityScanError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty file is an empty config
    if yaml.is_null() {
        return Ok(CityScanConfig::default());
    }

    validate_schema(&yaml)?;
    Ok(serde_yaml::from_value(yaml)?)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), CityScanError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| CityScanError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| CityScanError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        return Err(CityScanError::Config(format!(
            "Invalid configuration: {}",
            messages.join("; ")
        )));
    }

    Ok(())
}
