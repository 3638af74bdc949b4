use async_trait::async_trait;

use crate::models::{GenerationParams, SummaryError};

/// Seam between the summarizer and whichever text-generation backend is
/// configured.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, SummaryError>;
}
