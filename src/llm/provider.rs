use async_trait::async_trait;
use crate::errors::CityScanError;
use crate::models::ImageInput;
use super::types::LLMResponse;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form text completion
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LLMResponse, CityScanError>;

    /// Multimodal completion: one text prompt plus one image
    async fn complete_with_image(
        &self,
        prompt: &str,
        image: &ImageInput,
    ) -> Result<LLMResponse, CityScanError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
