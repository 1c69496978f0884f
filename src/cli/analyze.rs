use std::path::Path;
use crate::cli::commands::AnalyzeArgs;
use crate::errors::CityScanError;
use crate::pipeline::Orchestrator;

pub async fn handle_analyze(args: AnalyzeArgs) -> Result<(), CityScanError> {
    let settings = super::load_settings(args.common.config.as_deref(), &args.common.overrides()).await?;
    let orchestrator = Orchestrator::from_settings(&settings)?;

    let report = orchestrator.analyze(Path::new(&args.image)).await?;
    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);
    Ok(())
}
