use clap::{Parser, Subcommand, Args};
use crate::config::SettingsOverrides;

#[derive(Parser)]
#[command(name = "cityscan", version, about = "Street-scene triage: potholes, trash and graffiti")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Env file loaded before configuration is resolved
    #[arg(long, default_value = ".env", global = true)]
    pub env_file: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Analyze a single image and print the report
    Analyze(AnalyzeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Options shared by every command that talks to the model service.
#[derive(Args, Clone)]
pub struct ModelArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Model API key (or set GOOGLE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model identifier for the specialists
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: ModelArgs,

    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Directory for transient uploads
    #[arg(long)]
    pub upload_dir: Option<String>,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: ModelArgs,

    /// Image to analyze
    pub image: String,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

impl ServeArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            host: self.host.clone(),
            port: self.port,
            upload_dir: self.upload_dir.as_ref().map(Into::into),
            ..self.common.overrides()
        }
    }
}

impl ModelArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            ..Default::default()
        }
    }
}
