use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColdReachError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{backend} API error: {message}")]
    ApiError {
        backend: String,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<anyhow::Error> for ColdReachError {
    fn from(error: anyhow::Error) -> Self {
        ColdReachError::UnexpectedError(error.to_string())
    }
}

pub type ColdReachResult<T> = std::result::Result<T, ColdReachError>;
