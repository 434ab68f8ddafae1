pub mod schema;
pub mod loader;

pub use schema::{Config, ApiConfig, SamplingConfig, PipelineConfig, Credentials};
