// src/llm/chat.rs
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::config::{Config, SamplingConfig};
use crate::error::{ColdReachResult, ColdReachError};
use super::{ChatBackend, ChatRequest};

/// OpenAI-compatible chat completion client over HTTP.
///
/// Both remote backends (the general-purpose chat model and the web-search
/// model) speak the same `/chat/completions` wire shape; they differ only in
/// base URL, model, credential, and whether sampling parameters are sent.
pub struct ChatClient {
    client: Client,
    name: String,
    base_url: String,
    model: String,
    api_key: String,
    sampling: Option<SamplingConfig>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repetition_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_seconds: u64,
        sampling: Option<SamplingConfig>,
    ) -> ColdReachResult<Self> {
        let name = name.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(format!("coldreach/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ColdReachError::ApiError {
                backend: name.clone(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            name,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            sampling,
        })
    }

    /// Client for the general-purpose chat backend, with sampling parameters
    pub fn chat(config: &Config) -> ColdReachResult<Self> {
        let api_key = config.credentials.chat_api_key().ok_or_else(|| {
            ColdReachError::ConfigError(
                "TOGETHER_API_KEY is not set; the chat backend requires it".to_string(),
            )
        })?;

        Self::new(
            "chat",
            &config.api.chat_base_url,
            &config.api.chat_model,
            api_key,
            config.api.timeout_seconds,
            Some(config.sampling.clone()),
        )
    }

    /// Client for the web-search backend. The original configuration wired
    /// this backend to the OpenAI key; that fallback is kept but logged.
    pub fn search(config: &Config) -> ColdReachResult<Self> {
        let (api_key, fallback) = config.credentials.search_api_key().ok_or_else(|| {
            ColdReachError::ConfigError(
                "Neither PERPLEXITY_API_KEY nor OPENAI_API_KEY is set; the search backend requires one"
                    .to_string(),
            )
        })?;

        if fallback {
            warn!("PERPLEXITY_API_KEY not set; authenticating the search backend with OPENAI_API_KEY");
        }

        Self::new(
            "search",
            &config.api.search_base_url,
            &config.api.search_model,
            api_key,
            config.api.timeout_seconds,
            None,
        )
    }

    /// Build the API URL for chat completions
    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, request: &'a ChatRequest) -> ChatCompletionRequest<'a> {
        let sampling = self.sampling.as_ref();

        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message { role: "system", content: &request.system },
                Message { role: "user", content: &request.user },
            ],
            max_tokens: request.max_tokens,
            temperature: sampling.map(|s| s.temperature),
            top_p: sampling.map(|s| s.top_p),
            top_k: sampling.map(|s| s.top_k),
            repetition_penalty: sampling.map(|s| s.repetition_penalty),
            stop: sampling.map(|s| s.stop.as_slice()),
        }
    }

    fn api_error(&self, message: String) -> ColdReachError {
        ColdReachError::ApiError {
            backend: self.name.clone(),
            message,
        }
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn complete(&self, request: ChatRequest) -> ColdReachResult<String> {
        let url = self.api_url();
        debug!("POST {} (model: {}, max_tokens: {})", url, self.model, request.max_tokens);

        let response = self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.build_request(&request))
            .send()
            .await
            .map_err(|e| self.api_error(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(self.api_error(format!("HTTP {}: {}", status, body)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| self.api_error(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| self.api_error("Response contained no choices".to_string()))?;

        Ok(choice.message.content)
    }
}
