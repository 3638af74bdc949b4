use std::env;
use tracing::warn;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("GEMINI_API_KEY not set, clinical summaries will fall back to raw text");
                    String::new()
                }),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("GEMINI_BASE_URL not set, using default");
                    DEFAULT_GEMINI_BASE_URL.to_string()
                }),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| {
                    warn!("GEMINI_MODEL not set, using default");
                    DEFAULT_GEMINI_MODEL.to_string()
                }),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or_else(|| {
                    warn!("SERVER_PORT not set or invalid, using {}", DEFAULT_SERVER_PORT);
                    DEFAULT_SERVER_PORT
                }),
        };

        if !config.is_ai_configured() {
            warn!("AI summarization not configured - missing GEMINI_API_KEY");
        }

        config
    }

    pub fn is_ai_configured(&self) -> bool {
        !self.gemini_api_key.is_empty()
            && !self.gemini_base_url.is_empty()
            && !self.gemini_model.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
