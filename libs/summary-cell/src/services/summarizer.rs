use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_config::AppConfig;

use crate::models::CLINICAL_BRIEF_PARAMS;
use crate::services::gemini::GeminiClient;
use crate::services::generator::TextGenerator;

/// Inputs shorter than this are returned untouched without an external call.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 10;

pub fn build_prompt(reason: &str) -> String {
    format!(
        "You are a clinical assistant. Summarize the following patient's reason for visiting into a professional, concise clinical brief for a doctor. Input: \"{}\"",
        reason
    )
}

/// Turns a patient's free-text reason for visiting into a clinical brief.
///
/// `summarize` never fails: any error from the generator is logged and the
/// original text is returned instead. It keeps no cache; deciding whether to
/// summarize again is up to the caller.
#[derive(Clone)]
pub struct ClinicalSummarizer {
    generator: Arc<dyn TextGenerator>,
}

impl ClinicalSummarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(GeminiClient::new(config)))
    }

    pub async fn summarize(&self, reason: &str) -> String {
        if reason.chars().count() < MIN_SUMMARY_INPUT_CHARS {
            debug!("Reason too short to summarize, passing through");
            return reason.to_string();
        }

        let prompt = build_prompt(reason);

        match self.generator.generate(&prompt, &CLINICAL_BRIEF_PARAMS).await {
            Ok(text) => {
                let summary = text.trim();
                if summary.is_empty() {
                    warn!("AI summarization returned empty text, using original reason");
                    return reason.to_string();
                }
                info!("Clinical summary generated ({} chars)", summary.chars().count());
                summary.to_string()
            }
            Err(e) => {
                warn!("AI summarization failed, using original reason: {}", e);
                reason.to_string()
            }
        }
    }
}
