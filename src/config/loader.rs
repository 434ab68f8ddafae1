use std::env;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use config::{Config as ConfigLoader, FileFormat};

use super::schema::{Config, Credentials};

/// Load configuration from a file
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let mut config_builder = ConfigLoader::builder();

    // Default configuration
    config_builder = config_builder.add_source(
        config::File::from_str(
            include_str!("../../config/default.toml"),
            FileFormat::Toml
        )
    );

    // User-provided configuration
    if let Some(path) = config_path {
        config_builder = config_builder.add_source(config::File::from(path));
    } else {
        // Try to load from default location
        let default_path = get_default_config_path();
        if default_path.exists() {
            config_builder = config_builder.add_source(config::File::from(default_path.as_path()));
        }
    }

    // Environment variables
    config_builder = config_builder.add_source(
        config::Environment::with_prefix("COLDREACH").separator("__")
    );

    // Build and parse configuration
    let mut config: Config = config_builder
        .build()?
        .try_deserialize()
        .context("Failed to load configuration")?;

    config.credentials = load_credentials();

    Ok(config)
}

/// Read the three credential slots from the process environment.
/// Missing keys are left unset; the backend constructors decide whether
/// that is fatal.
fn load_credentials() -> Credentials {
    Credentials {
        together_api_key: env_var("TOGETHER_API_KEY"),
        perplexity_api_key: env_var("PERPLEXITY_API_KEY"),
        openai_api_key: env_var("OPENAI_API_KEY"),
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get the default configuration path
fn get_default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".coldreach/config.toml")
}
