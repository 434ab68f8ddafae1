// src/app.rs
use std::sync::Arc;
use tracing::info;

use crate::cli::InputCollector;
use crate::config::Config;
use crate::error::ColdReachResult;
use crate::llm::{ChatBackend, ChatClient};
use crate::pipeline::{QueryPlanner, ResearchGatherer, EmailComposer, UserTarget};

/// Top-level driver: Collector -> Planner -> Gatherer -> Composer -> Output.
///
/// Strictly linear; every stage blocks on the previous one and any backend
/// failure aborts the run with no partial output.
pub struct App {
    config: Config,
    chat_backend: Arc<dyn ChatBackend>,
    search_backend: Arc<dyn ChatBackend>,
}

impl App {
    /// Create the application with HTTP-backed chat and search clients.
    pub fn new(config: Config) -> ColdReachResult<Self> {
        let chat_backend: Arc<dyn ChatBackend> = Arc::new(ChatClient::chat(&config)?);
        let search_backend: Arc<dyn ChatBackend> = Arc::new(ChatClient::search(&config)?);

        Ok(Self {
            config,
            chat_backend,
            search_backend,
        })
    }

    /// Create the application with explicit backends (used by tests).
    pub fn with_backends(
        config: Config,
        chat_backend: Arc<dyn ChatBackend>,
        search_backend: Arc<dyn ChatBackend>,
    ) -> Self {
        Self {
            config,
            chat_backend,
            search_backend,
        }
    }

    /// Collect the target interactively, then run the pipeline.
    pub async fn run(&self) -> ColdReachResult<()> {
        let target = InputCollector::new().collect()?;
        println!(
            "User input collected: {} '{}'{}",
            target.target_type,
            target.target,
            if target.additional_info.is_empty() {
                String::new()
            } else {
                format!(" ({})", target.additional_info)
            }
        );

        let email = self.run_pipeline(&target).await?;

        println!("\nGenerated Cold Email:");
        println!("{}", email);

        Ok(())
    }

    /// Run planner, gatherer, and composer for an already-collected target,
    /// printing stage output along the way. Returns the generated email.
    pub async fn run_pipeline(&self, target: &UserTarget) -> ColdReachResult<String> {
        let planner = QueryPlanner::new(self.chat_backend.clone(), &self.config.pipeline);
        let gatherer = ResearchGatherer::new(self.search_backend.clone(), &self.config.pipeline);
        let composer = EmailComposer::new(self.chat_backend.clone(), &self.config.pipeline);

        let queries = planner.optimize_queries(target).await?;
        println!("Optimized search queries:");
        for (i, query) in queries.iter().enumerate() {
            println!("{}. {}", i + 1, query);
        }

        let results = gatherer.gather(&queries).await?;
        println!("\nResearch Results Summary:");
        for result in &results {
            println!("Query: {}", result.query);
            println!(
                "Summary: {}...",
                truncate_chars(&result.result, self.config.pipeline.preview_chars)
            );
            println!();
        }

        info!("Research complete ({} results), composing email", results.len());
        composer.generate_email(&results, target).await
    }
}

/// First `max_chars` characters of a string (display truncation only).
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, Credentials, PipelineConfig, SamplingConfig};
    use crate::error::ColdReachError;
    use crate::llm::MockChatBackend;
    use crate::pipeline::TargetType;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                chat_base_url: "https://chat.invalid".to_string(),
                chat_model: "chat-model".to_string(),
                search_base_url: "https://search.invalid".to_string(),
                search_model: "search-model".to_string(),
                timeout_seconds: 30,
            },
            sampling: SamplingConfig {
                temperature: 0.7,
                top_p: 0.7,
                top_k: 50,
                repetition_penalty: 1.0,
                stop: vec!["<|eot_id|>".to_string(), "<|eom_id|>".to_string()],
            },
            pipeline: PipelineConfig {
                planner_max_tokens: 256,
                research_max_tokens: 500,
                email_max_tokens: 512,
                summary_truncate_chars: 100,
                preview_chars: 150,
            },
            credentials: Credentials::default(),
        }
    }

    fn acme() -> UserTarget {
        UserTarget {
            target_type: TargetType::Company,
            target: "Acme Corp".to_string(),
            additional_info: String::new(),
        }
    }

    #[tokio::test]
    async fn test_five_query_happy_path() {
        let mut chat = MockChatBackend::new();
        // Planner call
        chat.expect_complete()
            .withf(|r| r.user.starts_with("Generate 5 optimized search queries") && r.max_tokens == 256)
            .times(1)
            .returning(|_| Ok("Q1\nQ2\nQ3\nQ4\nQ5".to_string()));
        // Composer call: sees the target label and every truncated line
        chat.expect_complete()
            .withf(|r| {
                r.max_tokens == 512
                    && r.user.contains("Company - Acme Corp")
                    && (1..=5).all(|i| r.user.contains(&format!("- Q{}: summary for Q{}...", i, i)))
            })
            .times(1)
            .returning(|_| Ok("Subject Line: Hello Acme".to_string()));

        let mut search = MockChatBackend::new();
        search
            .expect_complete()
            .withf(|r| r.user.starts_with('Q') && r.max_tokens == 500)
            .times(5)
            .returning(|r| Ok(format!("summary for {}", r.user)));

        let app = App::with_backends(test_config(), Arc::new(chat), Arc::new(search));
        let email = app.run_pipeline(&acme()).await.unwrap();

        assert!(!email.is_empty());
    }

    #[tokio::test]
    async fn test_degraded_planner_reply_runs_with_two_queries() {
        let mut chat = MockChatBackend::new();
        chat.expect_complete()
            .withf(|r| r.user.starts_with("Generate 5 optimized search queries"))
            .times(1)
            .returning(|_| Ok("Q1\n\nQ2 \n  \n".to_string()));
        chat.expect_complete()
            .withf(|r| {
                r.user.contains("- Q1: summary for Q1...")
                    && r.user.contains("- Q2: summary for Q2...")
                    && !r.user.contains("Q3")
            })
            .times(1)
            .returning(|_| Ok("Subject Line: Hello".to_string()));

        let mut search = MockChatBackend::new();
        search
            .expect_complete()
            .times(2)
            .returning(|r| Ok(format!("summary for {}", r.user)));

        let app = App::with_backends(test_config(), Arc::new(chat), Arc::new(search));
        let email = app.run_pipeline(&acme()).await.unwrap();

        assert!(!email.is_empty());
    }

    #[tokio::test]
    async fn test_gatherer_failure_aborts_before_composer() {
        let mut chat = MockChatBackend::new();
        // Only the planner call; the composer must never run
        chat.expect_complete()
            .times(1)
            .returning(|_| Ok("Q1\nQ2\nQ3".to_string()));

        let mut search = MockChatBackend::new();
        search
            .expect_complete()
            .times(1)
            .returning(|_| {
                Err(ColdReachError::ApiError {
                    backend: "search".to_string(),
                    message: "503 upstream".to_string(),
                })
            });

        let app = App::with_backends(test_config(), Arc::new(chat), Arc::new(search));
        let err = app.run_pipeline(&acme()).await.unwrap_err();

        assert!(matches!(err, ColdReachError::ApiError { .. }));
    }

    #[tokio::test]
    async fn test_empty_planner_reply_composes_from_empty_summary() {
        let mut chat = MockChatBackend::new();
        chat.expect_complete()
            .withf(|r| r.user.starts_with("Generate 5 optimized search queries"))
            .times(1)
            .returning(|_| Ok("   \n\n".to_string()));
        chat.expect_complete()
            .withf(|r| r.user.contains("Research Summary:\n\n"))
            .times(1)
            .returning(|_| Ok("Subject Line: Hello".to_string()));

        let mut search = MockChatBackend::new();
        search.expect_complete().times(0);

        let app = App::with_backends(test_config(), Arc::new(chat), Arc::new(search));
        let email = app.run_pipeline(&acme()).await.unwrap();

        assert!(!email.is_empty());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 150), "hello");
        assert_eq!(truncate_chars(&"y".repeat(200), 150), "y".repeat(150));
    }
}
