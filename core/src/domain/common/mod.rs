use std::time::Duration;

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct ProductLensConfig {
    pub llm: LLMConfig,
    pub analysis: AnalysisConfig,
    pub database: Option<DatabaseConfig>,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    /// `None` keeps the server running; analysis then fails with a configuration error.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Upper bound on images analyzed at the same time within one batch
    pub concurrency: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
}
