// src/pipeline/composer.rs
use std::sync::Arc;
use tracing::{info, debug};

use crate::config::PipelineConfig;
use crate::error::ColdReachResult;
use crate::llm::{ChatBackend, ChatRequest};
use super::{ResearchResult, UserTarget, CHAT_SYSTEM_PROMPT};

/// Writes the cold outreach email from the aggregated research.
pub struct EmailComposer {
    backend: Arc<dyn ChatBackend>,
    max_tokens: u32,
    summary_truncate_chars: usize,
}

impl EmailComposer {
    pub fn new(backend: Arc<dyn ChatBackend>, pipeline: &PipelineConfig) -> Self {
        Self {
            backend,
            max_tokens: pipeline.email_max_tokens,
            summary_truncate_chars: pipeline.summary_truncate_chars,
        }
    }

    /// Generate the email. Returns the raw model text unmodified; the
    /// Subject/Greeting/Body/Signature structure is an instruction to the
    /// model, never parsed back out.
    pub async fn generate_email(
        &self,
        results: &[ResearchResult],
        target: &UserTarget,
    ) -> ColdReachResult<String> {
        let summary = build_research_summary(results, self.summary_truncate_chars);
        let prompt = build_composer_prompt(target, &summary);
        debug!("Composer prompt:\n{}", prompt);
        info!("Generating cold email for {} '{}'", target.target_type, target.target);

        self.backend
            .complete(ChatRequest::new(CHAT_SYSTEM_PROMPT, prompt, self.max_tokens))
            .await
    }
}

/// One line per result: `- <query>: <prefix>...`. The prefix is a fixed
/// number of characters and the ellipsis is appended whether or not the
/// result was actually longer than the prefix.
pub fn build_research_summary(results: &[ResearchResult], truncate_chars: usize) -> String {
    results
        .iter()
        .map(|r| {
            let prefix: String = r.result.chars().take(truncate_chars).collect();
            format!("- {}: {}...", r.query, prefix)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_composer_prompt(target: &UserTarget, research_summary: &str) -> String {
    format!(
        "\
You are an AI assistant tasked with writing a personalized cold email. Use the following information to craft the email:

Target: {target_type} - {target}
Additional Info: {additional_info}

Research Summary:
{research_summary}

Write a compelling cold email that:
1. Has a clear and attention-grabbing subject line
2. Introduces the sender and their company briefly
3. Demonstrates knowledge of the target {target_type_lower} based on the research
4. Highlights a specific pain point or opportunity
5. Proposes a solution or collaboration
6. Includes a clear call-to-action
7. Keeps the tone professional yet conversational
8. Is concise (aim for around 150-200 words)

Format the email with Subject Line, Greeting, Body, and Signature.",
        target_type = target.target_type.capitalized(),
        target = target.target,
        additional_info = target.additional_info,
        research_summary = research_summary,
        target_type_lower = target.target_type,
    )
}
