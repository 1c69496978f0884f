use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::CityScanError;
use crate::models::ImageInput;
use super::provider::LLMProvider;
use super::types::LLMResponse;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn generate(&self, body: Value) -> Result<LLMResponse, CityScanError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let resp = self.client.post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CityScanError::Network(format!("Gemini request failed: {}", e.without_url())))?;

        let status = resp.status().as_u16();
        if status == 429 {
            return Err(CityScanError::RateLimit("Gemini rate limit".into()));
        }
        if status == 401 || status == 403 {
            return Err(CityScanError::Authentication("Gemini rejected the API key".into()));
        }

        let data: Value = resp.json().await
            .map_err(|e| CityScanError::LLMApi(format!("Parse error: {}", e.without_url())))?;

        let content = extract_text(&data)?;
        debug!(model = %self.model, chars = content.len(), "Gemini response received");

        Ok(LLMResponse {
            content,
            input_tokens: data["usageMetadata"]["promptTokenCount"].as_u64(),
            output_tokens: data["usageMetadata"]["candidatesTokenCount"].as_u64(),
            model: self.model.clone(),
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, CityScanError> {
        self.generate(text_request_body(prompt, system)).await
    }

    async fn complete_with_image(&self, prompt: &str, image: &ImageInput) -> Result<LLMResponse, CityScanError> {
        self.generate(image_request_body(prompt, image)).await
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}

fn text_request_body(prompt: &str, system: Option<&str>) -> Value {
    let text = match system {
        Some(sys) => format!("System: {}\n\n{}", sys, prompt),
        None => prompt.to_string(),
    };
    json!({
        "contents": [{"role": "user", "parts": [{"text": text}]}],
    })
}

fn image_request_body(prompt: &str, image: &ImageInput) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                {"text": prompt},
                {"inline_data": {"mime_type": image.mime_type, "data": image.to_base64()}},
            ]
        }],
    })
}

/// Concatenate the text parts of the first candidate.
fn extract_text(data: &Value) -> Result<String, CityScanError> {
    if let Some(error) = data.get("error") {
        return Err(CityScanError::LLMApi(
            error["message"].as_str().unwrap_or("Unknown").to_string(),
        ));
    }

    let parts = data["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            let reason = data["promptFeedback"]["blockReason"]
                .as_str()
                .or_else(|| data["candidates"][0]["finishReason"].as_str())
                .unwrap_or("no candidates");
            CityScanError::LLMApi(format!("Gemini returned no content ({})", reason))
        })?;

    Ok(parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join(""))
}
