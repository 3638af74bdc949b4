pub mod models;
pub mod services;

pub use models::{GenerationParams, SummaryError, CLINICAL_BRIEF_PARAMS};
pub use services::{
    gemini::GeminiClient,
    generator::TextGenerator,
    summarizer::{build_prompt, ClinicalSummarizer, MIN_SUMMARY_INPUT_CHARS},
};
