// src/pipeline/planner.rs
use std::sync::Arc;
use tracing::{info, debug};

use crate::config::PipelineConfig;
use crate::error::ColdReachResult;
use crate::llm::{ChatBackend, ChatRequest};
use super::{UserTarget, CHAT_SYSTEM_PROMPT};

/// Turns a user target into a list of market-research search queries by
/// asking the chat backend for five of them, one per line.
pub struct QueryPlanner {
    backend: Arc<dyn ChatBackend>,
    max_tokens: u32,
}

impl QueryPlanner {
    pub fn new(backend: Arc<dyn ChatBackend>, pipeline: &PipelineConfig) -> Self {
        Self {
            backend,
            max_tokens: pipeline.planner_max_tokens,
        }
    }

    /// Generate search queries for the target.
    ///
    /// The reply is parsed line-by-line; nominally five queries come back but
    /// the count is not enforced, and a short reply degrades downstream
    /// rather than erroring.
    pub async fn optimize_queries(&self, target: &UserTarget) -> ColdReachResult<Vec<String>> {
        let prompt = build_planner_prompt(target);
        debug!("Planner prompt: {}", prompt);

        let response = self.backend
            .complete(ChatRequest::new(CHAT_SYSTEM_PROMPT, prompt, self.max_tokens))
            .await?;

        let queries = parse_query_lines(&response);
        info!("Planner produced {} queries", queries.len());

        Ok(queries)
    }
}

/// Build the planner instruction for a target
fn build_planner_prompt(target: &UserTarget) -> String {
    let mut prompt = format!(
        "Generate 5 optimized search queries for market research on the {} '{}'. ",
        target.target_type, target.target
    );
    if !target.additional_info.is_empty() {
        prompt.push_str(&format!("Additional information: {}. ", target.additional_info));
    }
    prompt.push_str(
        "Each query should be on a new line and focus on different aspects of market research \
         such as market size, competitors, trends, challenges, and opportunities.",
    );
    prompt
}

/// Split a raw model reply into queries: one per line, trimmed, blank lines
/// discarded, original order kept. No deduplication or count validation.
pub fn parse_query_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TargetType;

    fn target(additional_info: &str) -> UserTarget {
        UserTarget {
            target_type: TargetType::Company,
            target: "Acme Corp".to_string(),
            additional_info: additional_info.to_string(),
        }
    }

    #[test]
    fn test_parse_query_lines_drops_blanks_keeps_order() {
        let parsed = parse_query_lines("Q1\n\nQ2 \n  \nQ3");
        assert_eq!(parsed, vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn test_parse_query_lines_empty_input() {
        assert!(parse_query_lines("").is_empty());
        assert!(parse_query_lines("   \n\n\t\n").is_empty());
    }

    #[test]
    fn test_parse_query_lines_keeps_duplicates() {
        let parsed = parse_query_lines("same\nsame\nsame");
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_prompt_mentions_target_and_aspects() {
        let prompt = build_planner_prompt(&target(""));
        assert!(prompt.contains("market research on the company 'Acme Corp'"));
        assert!(prompt.contains("market size, competitors, trends, challenges, and opportunities"));
        assert!(!prompt.contains("Additional information"));
    }

    #[test]
    fn test_prompt_includes_additional_info_when_present() {
        let prompt = build_planner_prompt(&target("expanding into APAC"));
        assert!(prompt.contains("Additional information: expanding into APAC. "));
    }
}
