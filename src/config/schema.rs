use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub sampling: SamplingConfig,
    pub pipeline: PipelineConfig,

    /// Credentials are read from the process environment at load time and
    /// never appear in config files.
    #[serde(skip)]
    pub credentials: Credentials,
}

/// Backend endpoint and model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub chat_base_url: String,
    pub chat_model: String,
    pub search_base_url: String,
    pub search_model: String,
    pub timeout_seconds: u64,
}

/// Sampling parameters for the general-purpose chat backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub repetition_penalty: f64,
    pub stop: Vec<String>,
}

/// Per-stage generation limits and display truncation lengths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub planner_max_tokens: u32,
    pub research_max_tokens: u32,
    pub email_max_tokens: u32,
    pub summary_truncate_chars: usize,
    pub preview_chars: usize,
}

/// API keys, one named slot per backend credential.
///
/// The search backend historically authenticated with the OpenAI key; the
/// resolution order in `search_api_key()` keeps that behavior reachable
/// while preferring the properly named slot.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub together_api_key: Option<String>,
    pub perplexity_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// Key for the general-purpose chat backend.
    pub fn chat_api_key(&self) -> Option<&str> {
        self.together_api_key.as_deref()
    }

    /// Key for the web-search backend. Falls back to the OpenAI slot when
    /// the Perplexity slot is unset; the caller logs the fallback.
    pub fn search_api_key(&self) -> Option<(&str, bool)> {
        if let Some(key) = self.perplexity_api_key.as_deref() {
            return Some((key, false));
        }
        self.openai_api_key.as_deref().map(|key| (key, true))
    }
}

impl Config {
    /// Load configuration from a file or the defaults
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        crate::config::loader::load_config(config_path)
    }
}
