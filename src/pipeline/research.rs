// src/pipeline/research.rs
use std::sync::Arc;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::ColdReachResult;
use crate::llm::{ChatBackend, ChatRequest};
use super::ResearchResult;

const RESEARCH_SYSTEM_PROMPT: &str = "You are an AI research assistant. Provide a concise summary of the most relevant information found online for the given query. Focus on factual data and key insights.";

/// Fetches a web-grounded summary for each search query, strictly in order.
pub struct ResearchGatherer {
    backend: Arc<dyn ChatBackend>,
    max_tokens: u32,
}

impl ResearchGatherer {
    pub fn new(backend: Arc<dyn ChatBackend>, pipeline: &PipelineConfig) -> Self {
        Self {
            backend,
            max_tokens: pipeline.research_max_tokens,
        }
    }

    /// Run one search request per query, sequentially. Returns exactly one
    /// result per query in input order. Duplicate queries are fetched
    /// independently; the first failure aborts the whole run.
    pub async fn gather(&self, queries: &[String]) -> ColdReachResult<Vec<ResearchResult>> {
        let mut results = Vec::with_capacity(queries.len());

        for query in queries {
            println!("Researching: {}", query);
            info!("Fetching research for query: {}", query);

            let result = self.backend
                .complete(ChatRequest::new(RESEARCH_SYSTEM_PROMPT, query.clone(), self.max_tokens))
                .await?;

            results.push(ResearchResult {
                query: query.clone(),
                result,
            });
        }

        Ok(results)
    }
}
