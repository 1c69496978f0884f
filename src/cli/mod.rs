pub mod commands;
pub mod serve;
pub mod analyze;
pub mod validate;

pub use commands::{Cli, Commands};

use std::path::Path;
use crate::config::{parse_config, CityScanConfig, Settings, SettingsOverrides};
use crate::errors::CityScanError;

/// Resolve settings from an optional config file, the process environment
/// and command-line overrides.
pub async fn load_settings(
    config_path: Option<&str>,
    overrides: &SettingsOverrides,
) -> Result<Settings, CityScanError> {
    let file = match config_path {
        Some(path) => parse_config(Path::new(path)).await?,
        None => CityScanConfig::default(),
    };
    Settings::resolve(&file, overrides, |name| std::env::var(name).ok())
}
