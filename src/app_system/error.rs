use thiserror::Error;
use crate::order_actor::OrderError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} is invalid: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse seed file {path}: {source}")]
    SeedParse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to create seed order: {0}")]
    Seed(#[from] OrderError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
