use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::{GenerateContentRequest, GenerateContentResponse, GenerationParams, SummaryError};
use crate::services::generator::TextGenerator;

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, SummaryError> {
        if !self.is_configured() {
            return Err(SummaryError::NotConfigured);
        }

        let url = self.endpoint();
        debug!("Sending generateContent request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&GenerateContentRequest::new(prompt, params))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("Gemini request failed: {} - {}", status, response_text);
            return Err(SummaryError::Service {
                status: status.as_u16(),
                message: response_text,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| SummaryError::MalformedResponse(e.to_string()))?;

        let text = parsed.text().ok_or(SummaryError::EmptyResponse)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SummaryError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}
