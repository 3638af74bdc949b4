use serde_json::json;

use shared_config::AppConfig;

pub const TEST_GEMINI_MODEL: &str = "test-gemini-model";

pub struct TestConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: "test-gemini-key".to_string(),
            gemini_base_url: "http://localhost:54321/v1beta".to_string(),
            gemini_model: TEST_GEMINI_MODEL.to_string(),
        }
    }
}

impl TestConfig {
    /// Points the AI client at a local mock server.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            gemini_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn without_api_key() -> Self {
        Self {
            gemini_api_key: String::new(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            gemini_api_key: self.gemini_api_key.clone(),
            gemini_base_url: self.gemini_base_url.clone(),
            gemini_model: self.gemini_model.clone(),
            ..AppConfig::default()
        }
    }

    /// Request path the mock server sees for a generateContent call.
    pub fn generate_content_path(&self) -> String {
        format!("/models/{}:generateContent", self.gemini_model)
    }
}

/// Patient used by the confirmation-message fixtures.
pub struct TestPatient {
    pub name: &'static str,
    pub phone: &'static str,
    pub reason: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub doctor_id: u32,
    pub summary: &'static str,
}

impl Default for TestPatient {
    fn default() -> Self {
        Self {
            name: "Jane Doe",
            phone: "5551234567",
            reason: "Persistent headache for 3 days",
            date: "2025-06-01",
            time: "09:00 AM",
            doctor_id: 1,
            summary: "Patient reports 3-day headache.",
        }
    }
}

pub struct MockGeminiResponses;

impl MockGeminiResponses {
    pub fn summary_response(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                },
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {
                "promptTokenCount": 42,
                "candidatesTokenCount": 12,
                "totalTokenCount": 54
            }
        })
    }

    pub fn blocked_response() -> serde_json::Value {
        json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        })
    }

    pub fn error_response(message: &str, code: u16) -> serde_json::Value {
        json!({
            "error": {
                "code": code,
                "message": message,
                "status": "INTERNAL"
            }
        })
    }
}
