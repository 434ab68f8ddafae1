pub mod planner;
pub mod research;
pub mod composer;

use std::fmt;

/// System instruction for the general-purpose chat backend. The planner and
/// the composer both go through the same chat helper, so they share it.
pub(crate) const CHAT_SYSTEM_PROMPT: &str = "You are an AI assistant that generates optimized search queries based on user input. Your queries should be concise and focused on gathering market research information.";

pub use planner::QueryPlanner;
pub use research::ResearchGatherer;
pub use composer::EmailComposer;

/// What kind of entity the outreach is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Industry,
    Company,
}

impl TargetType {
    /// Capitalized form used in the composer prompt
    pub fn capitalized(&self) -> &'static str {
        match self {
            TargetType::Industry => "Industry",
            TargetType::Company => "Company",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Industry => write!(f, "industry"),
            TargetType::Company => write!(f, "company"),
        }
    }
}

/// The target collected from the user, immutable once built
#[derive(Debug, Clone)]
pub struct UserTarget {
    pub target_type: TargetType,
    pub target: String,
    pub additional_info: String,
}

/// One web research answer, paired with the query that produced it
#[derive(Debug, Clone)]
pub struct ResearchResult {
    pub query: String,
    pub result: String,
}
