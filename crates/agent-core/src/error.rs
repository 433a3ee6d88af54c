//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Rate limited or quota exhausted
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation the agent does not offer (e.g. task cancellation)
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// No task with the given ID
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Request parameters did not match the method
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The consumer side of an event queue is gone
    #[error("Event queue closed")]
    EventQueueClosed,

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}
