// src/cli/interactive.rs
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::debug;

use crate::error::{ColdReachResult, ColdReachError};
use crate::pipeline::{TargetType, UserTarget};

/// Collects the outreach target from interactive prompts.
pub struct InputCollector {
    theme: ColorfulTheme,
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompt the user for target type, target name, and optional context.
    ///
    /// The target type is the only validated field: the prompt repeats until
    /// the answer normalizes to `industry` or `company`. Name and context
    /// are accepted as-is.
    pub fn collect(&self) -> ColdReachResult<UserTarget> {
        println!("Welcome to the AI-powered Market Research and Cold Email Generator!");
        println!("Please provide some information about your target:");

        let target_type = loop {
            let answer: String = Input::with_theme(&self.theme)
                .with_prompt("Are you targeting an industry or a specific company? (industry/company)")
                .interact_text()
                .map_err(|e| ColdReachError::UnexpectedError(format!("Input error: {}", e)))?;

            match parse_target_type(&answer) {
                Some(target_type) => break target_type,
                None => println!("Invalid input. Please enter 'industry' or 'company'."),
            }
        };

        let name_prompt = match target_type {
            TargetType::Industry => "Please enter the industry you want to target",
            TargetType::Company => "Please enter the name of the company you want to target",
        };

        let target: String = Input::with_theme(&self.theme)
            .with_prompt(name_prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ColdReachError::UnexpectedError(format!("Input error: {}", e)))?;

        let additional_info: String = Input::with_theme(&self.theme)
            .with_prompt("Any additional information or specific areas of interest? (Press Enter to skip)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ColdReachError::UnexpectedError(format!("Input error: {}", e)))?;

        debug!("Collected target: {} '{}'", target_type, target.trim());

        Ok(UserTarget {
            target_type,
            target: target.trim().to_string(),
            additional_info: additional_info.trim().to_string(),
        })
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a target-type answer: trimmed, case-insensitive, exact match
/// only. Anything else re-prompts.
pub fn parse_target_type(input: &str) -> Option<TargetType> {
    match input.trim().to_lowercase().as_str() {
        "industry" => Some(TargetType::Industry),
        "company" => Some(TargetType::Company),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact_and_normalized_forms() {
        assert_eq!(parse_target_type("industry"), Some(TargetType::Industry));
        assert_eq!(parse_target_type("Industry"), Some(TargetType::Industry));
        assert_eq!(parse_target_type("COMPANY"), Some(TargetType::Company));
        assert_eq!(parse_target_type(" company "), Some(TargetType::Company));
    }

    #[test]
    fn test_rejects_everything_else() {
        assert_eq!(parse_target_type("Industries"), None);
        assert_eq!(parse_target_type("comp"), None);
        assert_eq!(parse_target_type(""), None);
        assert_eq!(parse_target_type("both"), None);
    }
}
