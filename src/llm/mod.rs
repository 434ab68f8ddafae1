pub mod chat;

use async_trait::async_trait;

use crate::error::ColdReachResult;

pub use chat::ChatClient;

/// A single-turn chat request: one fixed system instruction plus one user
/// message. Sampling parameters belong to the backend, not the request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens,
        }
    }
}

/// Trait for chat completion backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Get the name of the backend (used in logs and error messages)
    fn name(&self) -> String;

    /// Send a single-turn request and return the completion text
    async fn complete(&self, request: ChatRequest) -> ColdReachResult<String>;
}
