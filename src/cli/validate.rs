use std::path::Path;
use crate::cli::commands::ValidateArgs;
use crate::config::parse_config;
use crate::errors::CityScanError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), CityScanError> {
    let config = parse_config(Path::new(&args.config)).await?;
    if let Some(dir) = config.analysis.as_ref().and_then(|a| a.prompts_dir.as_deref()) {
        crate::prompts::PromptSet::load(Path::new(dir))?;
    }
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
