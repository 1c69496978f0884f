use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::errors::CityScanError;
use crate::llm::LLMProvider;
use crate::models::{ClassifierResult, ImageInput, Specialist};
use crate::prompts::PromptSet;
use super::parser::{parse_classifier_output, ParsedOutput};
use super::registry::definition;
use tracing::{info, warn};

/// Runs one specialist prompt against an image through the multimodal model.
#[derive(Clone)]
pub struct ClassifierClient {
    llm: Arc<dyn LLMProvider>,
    prompts: Arc<PromptSet>,
    timeout: Option<Duration>,
}

impl ClassifierClient {
    pub fn new(llm: Arc<dyn LLMProvider>, prompts: Arc<PromptSet>) -> Self {
        Self { llm, prompts, timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Unparseable model output becomes an `{error}` result; provider and
    /// transport failures are returned as `Err` for the caller to capture.
    pub async fn classify(
        &self,
        specialist: Specialist,
        image: &ImageInput,
    ) -> Result<ClassifierResult, CityScanError> {
        let def = definition(specialist);
        let prompt = self.prompts.specialist(specialist);
        let start = Instant::now();
        info!(agent = def.display_name, model = %self.llm.model_name(), "Running specialist");

        let call = self.llm.complete_with_image(prompt, image);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                CityScanError::Timeout(format!(
                    "{} agent did not respond within {}ms",
                    def.display_name,
                    limit.as_millis()
                ))
            })??,
            None => call.await?,
        };

        let result = match parse_classifier_output(&response.content) {
            ParsedOutput::Success { description, severity_score } => {
                ClassifierResult::Detection { description, severity_score }
            }
            ParsedOutput::ParseFailure { raw, reason } => {
                warn!(agent = def.display_name, reason = %reason, raw = %raw, "Error decoding JSON from agent");
                ClassifierResult::failed(format!("Failed to parse output from {}", def.display_name))
            }
        };

        info!(
            agent = def.display_name,
            duration_ms = start.elapsed().as_millis() as u64,
            severity_score = result.severity_score(),
            "Specialist finished"
        );
        Ok(result)
    }
}
