use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use futures::stream::{FuturesUnordered, StreamExt};
use crate::agents::{definition, ClassifierClient};
use crate::config::Settings;
use crate::errors::CityScanError;
use crate::llm::{GeminiProvider, LLMProvider};
use crate::models::{AggregateReport, ClassifierResult, ImageInput, Specialist};
use crate::prompts::PromptSet;
use tokio::task::AbortHandle;
use super::aggregator::compute_cumulative_severity;
use tracing::{debug, error, info, warn};

/// Aborts the specialist tasks if the analysis is dropped before they finish.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Drives one analysis: image load, specialist fan-out, aggregation, summary.
pub struct Orchestrator {
    classifier: ClassifierClient,
    summarizer: Arc<dyn LLMProvider>,
    prompts: Arc<PromptSet>,
}

impl Orchestrator {
    pub fn new(
        classifier: ClassifierClient,
        summarizer: Arc<dyn LLMProvider>,
        prompts: Arc<PromptSet>,
    ) -> Self {
        Self { classifier, summarizer, prompts }
    }

    /// Wire Gemini-backed specialists and summarizer from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, CityScanError> {
        let prompts = Arc::new(match &settings.prompts_dir {
            Some(dir) => PromptSet::load(dir)?,
            None => PromptSet::default(),
        });

        let vision: Arc<dyn LLMProvider> = Arc::new(GeminiProvider::with_base_url(
            &settings.api_key,
            Some(settings.model.as_str()),
            &settings.base_url,
        ));
        let summarizer: Arc<dyn LLMProvider> = Arc::new(GeminiProvider::with_base_url(
            &settings.api_key,
            Some(settings.summary_model.as_str()),
            &settings.base_url,
        ));

        let classifier = ClassifierClient::new(vision, prompts.clone())
            .with_timeout(settings.classifier_timeout);
        Ok(Self::new(classifier, summarizer, prompts))
    }

    /// Analyze the image at `image_path`.
    ///
    /// Fails with `ImageLoad` before any specialist runs if the image cannot
    /// be opened. Specialist failures are captured in their own slot. A
    /// failed summary call fails the whole analysis.
    pub async fn analyze(&self, image_path: &Path) -> Result<AggregateReport, CityScanError> {
        let start = Instant::now();
        info!(path = %image_path.display(), "Starting orchestration");

        let image = match ImageInput::load(image_path).await {
            Ok(image) => Arc::new(image),
            Err(e) => {
                error!(path = %image_path.display(), error = %e, "Image could not be loaded");
                return Err(e);
            }
        };

        let results = self.run_specialists(image).await;
        info!("All agents completed");

        let mut report = AggregateReport {
            cumulative_severity_score: compute_cumulative_severity(&results),
            results,
            executive_summary: None,
        };
        info!(
            cumulative_severity_score = report.cumulative_severity_score,
            failed = report.failed_count(),
            "Aggregated specialist results"
        );

        let json_report = serde_json::to_string_pretty(&report)?;
        debug!(report = %json_report, "Aggregated JSON report");

        report.executive_summary = Some(self.summarize(&json_report).await?);
        info!(duration_ms = start.elapsed().as_millis() as u64, "Analysis complete");
        Ok(report)
    }

    /// Submit all three specialists, then collect them in completion order.
    async fn run_specialists(
        &self,
        image: Arc<ImageInput>,
    ) -> BTreeMap<Specialist, ClassifierResult> {
        let handles: Vec<_> = Specialist::ALL
            .iter()
            .map(|&specialist| {
                let classifier = self.classifier.clone();
                let image = image.clone();
                let handle = tokio::spawn(async move {
                    classifier.classify(specialist, &image).await
                });
                (specialist, handle)
            })
            .collect();
        let _abort = AbortOnDrop(handles.iter().map(|(_, h)| h.abort_handle()).collect());

        let mut pending: FuturesUnordered<_> = handles
            .into_iter()
            .map(|(specialist, handle)| async move { (specialist, handle.await) })
            .collect();

        let mut results = BTreeMap::new();
        while let Some((specialist, joined)) = pending.next().await {
            let agent = definition(specialist).display_name;
            let result = match joined {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    warn!(agent, error = %e, "Agent generated an exception");
                    ClassifierResult::failed(e.to_string())
                }
                Err(e) => {
                    error!(agent, error = %e, "Agent task panicked");
                    ClassifierResult::failed(format!("{} agent task failed: {}", agent, e))
                }
            };
            debug!(agent, position = results.len() + 1, "Agent result recorded");
            results.insert(specialist, result);
        }
        results
    }

    async fn summarize(&self, json_report: &str) -> Result<String, CityScanError> {
        info!(model = %self.summarizer.model_name(), "Generating executive summary");
        let prompt = self.prompts.render_summary(json_report);
        let response = self
            .summarizer
            .complete(&prompt, None)
            .await
            .map_err(|e| CityScanError::Summarization(e.to_string()))?;
        Ok(response.content.trim().to_string())
    }
}
