use thiserror::Error;

/// Errors that can occur while talking to the dashboard service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
