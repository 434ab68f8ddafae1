pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;

// Re-export main types for easier access
pub use app::App;
pub use config::Config;
pub use error::{ColdReachError, ColdReachResult};
pub use llm::{ChatBackend, ChatClient, ChatRequest};
pub use pipeline::{
    QueryPlanner,
    ResearchGatherer,
    EmailComposer,
    UserTarget,
    TargetType,
    ResearchResult,
};
